//! Result exports: comparison spreadsheet and grouped error summary

use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook};
use scanline_stats::SummaryStats;
use tracing::info;

use crate::error::{ExportError, ExportResult};
use crate::row::{ComparisonRow, COLUMN_NAMES};

/// File name of the full comparison spreadsheet
pub const WORKBOOK_NAME: &str = "analise_comparativa.xlsx";
/// File name of the grouped error-summary CSV
pub const SUMMARY_NAME: &str = "resumo_estatistico.csv";

/// Write the comparison spreadsheet and the grouped summary CSV into
/// `out_dir`, creating it if needed. Returns both paths.
pub fn export_results(
    rows: &[ComparisonRow],
    out_dir: &Path,
) -> ExportResult<(PathBuf, PathBuf)> {
    fs::create_dir_all(out_dir).map_err(|source| ExportError::CreateDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let workbook_path = out_dir.join(WORKBOOK_NAME);
    write_workbook(rows, &workbook_path)?;

    let summary_path = out_dir.join(SUMMARY_NAME);
    write_summary_csv(rows, &summary_path)?;

    info!(
        "Exported: {}, {}",
        workbook_path.display(),
        summary_path.display()
    );
    Ok((workbook_path, summary_path))
}

fn write_workbook(rows: &[ComparisonRow], path: &Path) -> ExportResult<()> {
    let fail = |message: String| ExportError::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, name) in COLUMN_NAMES.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *name, &bold)
            .map_err(|e| fail(e.to_string()))?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet
            .write_string(r, 0, &row.config)
            .and_then(|ws| ws.write_number(r, 1, row.plane as f64))
            .and_then(|ws| ws.write_string(r, 2, &row.method))
            .and_then(|ws| ws.write_number(r, 3, row.dip_field))
            .and_then(|ws| ws.write_number(r, 4, row.dip_dir_field))
            .and_then(|ws| ws.write_number(r, 5, row.dip_method))
            .and_then(|ws| ws.write_number(r, 6, row.dip_dir_method))
            .and_then(|ws| ws.write_number(r, 7, row.n_measurements as f64))
            .and_then(|ws| ws.write_number(r, 8, row.dip_error))
            .and_then(|ws| ws.write_number(r, 9, row.dip_dir_error))
            .map_err(|e| fail(e.to_string()))?;
    }

    workbook.save(path).map_err(|e| fail(e.to_string()))?;
    Ok(())
}

/// One aggregated (plane, method) group of the summary CSV
#[derive(Debug)]
struct ErrorAggregate {
    plane: i8,
    method: String,
    dip: SummaryStats,
    dip_dir: SummaryStats,
    n_total: usize,
}

fn aggregate_errors(rows: &[ComparisonRow]) -> Vec<ErrorAggregate> {
    let mut keys: Vec<(i8, &String)> = Vec::new();
    for row in rows {
        let key = (row.plane, &row.method);
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    keys.into_iter()
        .map(|(plane, method)| {
            let group: Vec<&ComparisonRow> = rows
                .iter()
                .filter(|r| r.plane == plane && &r.method == method)
                .collect();
            let dip_errors: Vec<f64> = group.iter().map(|r| r.dip_error).collect();
            let dip_dir_errors: Vec<f64> = group.iter().map(|r| r.dip_dir_error).collect();
            ErrorAggregate {
                plane,
                method: method.clone(),
                dip: SummaryStats::from_data(&dip_errors),
                dip_dir: SummaryStats::from_data(&dip_dir_errors),
                n_total: group.iter().map(|r| r.n_measurements).sum(),
            }
        })
        .collect()
}

fn write_summary_csv(rows: &[ComparisonRow], path: &Path) -> ExportResult<()> {
    let fail = |message: String| ExportError::Csv {
        path: path.to_path_buf(),
        message,
    };

    let mut writer = csv::Writer::from_path(path).map_err(|e| fail(e.to_string()))?;
    writer
        .write_record([
            "Plano",
            "Metodo",
            "Erro_Dip_mean",
            "Erro_Dip_std",
            "Erro_Dip_min",
            "Erro_Dip_max",
            "Erro_DipDir_mean",
            "Erro_DipDir_std",
            "Erro_DipDir_min",
            "Erro_DipDir_max",
            "N_Medicoes",
        ])
        .map_err(|e| fail(e.to_string()))?;

    for agg in aggregate_errors(rows) {
        writer
            .write_record([
                agg.plane.to_string(),
                agg.method.clone(),
                fmt_stat(agg.dip.mean),
                fmt_stat(agg.dip.std_dev),
                fmt_stat(agg.dip.min),
                fmt_stat(agg.dip.max),
                fmt_stat(agg.dip_dir.mean),
                fmt_stat(agg.dip_dir.std_dev),
                fmt_stat(agg.dip_dir.min),
                fmt_stat(agg.dip_dir.max),
                agg.n_total.to_string(),
            ])
            .map_err(|e| fail(e.to_string()))?;
    }

    writer.flush().map_err(|e| fail(e.to_string()))?;
    Ok(())
}

/// Single-row groups have no sample std; serialize NaN as an empty cell.
fn fmt_stat(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}
