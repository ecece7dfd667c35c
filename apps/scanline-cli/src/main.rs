//! scanline binary
//!
//! Loads a field survey, compares it against (synthetic) method estimates,
//! renders plots, and writes the spreadsheet/CSV exports.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scanline_core::{compare, export_results, render_plots};
use scanline_io::load_inputs;

/// Compare field discontinuity measurements against automated
/// plane-detection results
#[derive(Parser, Debug)]
#[command(name = "scanline", version, about)]
struct Args {
    /// Field measurement file (CSV or XLSX)
    field_data: String,

    /// GeoJSON file with mapped plane outlines
    #[arg(long)]
    geo: Option<String>,

    /// Output directory
    #[arg(long, default_value = "resultados")]
    out: PathBuf,

    /// Seed for the synthetic method estimates (default: from the clock)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(clock_seed);

    std::fs::create_dir_all(&args.out)?;

    let inputs = load_inputs(&args.field_data, args.geo.as_deref(), seed)?;
    let rows = compare(&inputs.field, &inputs.estimates)?;

    render_plots(&inputs.field, &rows, inputs.outlines.as_deref(), &args.out);
    export_results(&rows, &args.out)?;

    info!("Run complete, results in '{}'", args.out.display());
    Ok(())
}

fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["scanline", "campo.csv"]);
        assert_eq!(args.field_data, "campo.csv");
        assert!(args.geo.is_none());
        assert_eq!(args.out, PathBuf::from("resultados"));
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_args_full() {
        let args = Args::parse_from([
            "scanline",
            "campo.xlsx",
            "--geo",
            "planos.geojson",
            "--out",
            "saida",
            "--seed",
            "42",
        ]);
        assert_eq!(args.geo.as_deref(), Some("planos.geojson"));
        assert_eq!(args.out, PathBuf::from("saida"));
        assert_eq!(args.seed, Some(42));
    }
}
