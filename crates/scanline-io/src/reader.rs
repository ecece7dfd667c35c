//! Input loading entry points
//!
//! Format is sniffed from the file extension: `.csv` goes through the CSV
//! reader, anything else is treated as an XLSX workbook.

use std::path::Path;

use tracing::info;

use crate::geo::{load_plane_outlines, PlaneOutline};
use crate::survey::{distinct_configs, FieldMeasurement, MethodEstimate};
use crate::synth::synthetic_estimates;
use crate::{csv_reader, xlsx_reader, LoadError, LoadResult};

/// The three tables one invocation works from
#[derive(Debug, Clone)]
pub struct LoadedInputs {
    pub field: Vec<FieldMeasurement>,
    pub estimates: Vec<MethodEstimate>,
    /// Present only when a geo file was supplied and parsed
    pub outlines: Option<Vec<PlaneOutline>>,
}

/// Load field measurements from a CSV or XLSX file
pub fn load_survey(path: &str) -> LoadResult<Vec<FieldMeasurement>> {
    if !Path::new(path).exists() {
        return Err(LoadError::FileNotFound(path.to_string()));
    }

    let extension = path
        .rsplit('.')
        .next()
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => csv_reader::load_survey_csv(path),
        _ => xlsx_reader::load_survey_xlsx(path),
    }
}

/// Load every input table for one run.
///
/// The estimate table is synthetic, covering each of the survey's
/// configurations; `seed` fixes its contents. The geo path is optional and
/// best-effort.
pub fn load_inputs(
    field_path: &str,
    geo_path: Option<&str>,
    seed: u64,
) -> LoadResult<LoadedInputs> {
    info!("Loading field measurements from '{field_path}'");
    let field = load_survey(field_path)?;
    info!("Loaded {} field readings", field.len());

    info!("Preparing synthetic method estimates");
    let estimates = synthetic_estimates(&distinct_configs(&field), seed);

    let outlines = geo_path.and_then(load_plane_outlines);

    Ok(LoadedInputs {
        field,
        estimates,
        outlines,
    })
}
