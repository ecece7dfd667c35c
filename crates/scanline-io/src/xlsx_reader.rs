//! XLSX survey file reader

use calamine::{open_workbook, Reader, Xlsx};

use crate::survey::{column_indexes, measurement_from_cells, FieldMeasurement};
use crate::{LoadError, LoadResult};

/// Load field measurements from the first worksheet of an XLSX workbook
pub fn load_survey_xlsx(path: &str) -> LoadResult<Vec<FieldMeasurement>> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e: calamine::XlsxError| LoadError::OpenFailed(e.to_string()))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| LoadError::InvalidFormat("workbook contains no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| LoadError::InvalidFormat(format!("sheet '{sheet}': {e}")))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| LoadError::InvalidFormat(format!("sheet '{sheet}' is empty")))?
        .iter()
        .map(|cell| cell.to_string())
        .collect();
    let indexes = column_indexes(&headers)?;

    let mut measurements = Vec::new();
    for (i, row) in rows.enumerate() {
        let cells: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        measurements.push(measurement_from_cells(i + 1, &cells, indexes)?);
    }

    Ok(measurements)
}
