//! Survey data model and row parsing

use serde::{Deserialize, Serialize};

use crate::plane_code::plane_from_code;
use crate::{LoadError, LoadResult};

/// Columns every field-data file must carry
pub const REQUIRED_COLUMNS: [&str; 4] = ["VAR", "Dip_dir", "dip", "plano"];

/// One field survey reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMeasurement {
    /// Configuration identifier
    #[serde(rename = "VAR")]
    pub var: String,
    /// Dip direction in degrees (0-360)
    #[serde(rename = "Dip_dir")]
    pub dip_dir: f64,
    /// Dip in degrees (0-90)
    #[serde(rename = "dip")]
    pub dip: f64,
    /// Plane identifier in {1,2,3,4}, 0 = unclassified
    #[serde(rename = "plano")]
    pub plane: i8,
}

/// One method output row: mean orientation errors for a (config, method) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodEstimate {
    /// Lower-cased configuration identifier
    #[serde(rename = "Config")]
    pub config: String,
    /// Detection method name
    #[serde(rename = "Metodo")]
    pub method: String,
    #[serde(rename = "ErroMedio_Dip")]
    pub mean_dip_error: f64,
    #[serde(rename = "ErroMedio_DipDir")]
    pub mean_dip_dir_error: f64,
}

/// Distinct lower-cased configuration identifiers in first-seen order
pub fn distinct_configs(field: &[FieldMeasurement]) -> Vec<String> {
    let mut configs: Vec<String> = Vec::new();
    for m in field {
        let lower = m.var.to_lowercase();
        if !configs.contains(&lower) {
            configs.push(lower);
        }
    }
    configs
}

/// Locate the required columns, reporting every missing one at once
pub(crate) fn column_indexes(headers: &[String]) -> LoadResult<[usize; 4]> {
    let mut indexes = [0usize; 4];
    let mut missing = Vec::new();
    for (slot, name) in REQUIRED_COLUMNS.iter().enumerate() {
        match headers.iter().position(|h| h.trim() == *name) {
            Some(i) => indexes[slot] = i,
            None => missing.push(name.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }
    Ok(indexes)
}

/// Build one measurement from a row of cells.
///
/// `row` is the 1-based data row number used in error messages.
pub(crate) fn measurement_from_cells(
    row: usize,
    cells: &[String],
    indexes: [usize; 4],
) -> LoadResult<FieldMeasurement> {
    let var = cell(cells, indexes[0], row, "VAR")?.trim().to_string();
    let dip_dir = parse_degrees(row, "Dip_dir", cell(cells, indexes[1], row, "Dip_dir")?)?;
    let dip = parse_degrees(row, "dip", cell(cells, indexes[2], row, "dip")?)?;
    let plane = plane_from_code(cell(cells, indexes[3], row, "plano")?);

    Ok(FieldMeasurement {
        var,
        dip_dir,
        dip,
        plane,
    })
}

fn cell<'a>(cells: &'a [String], index: usize, row: usize, column: &str) -> LoadResult<&'a str> {
    cells
        .get(index)
        .map(|s| s.as_str())
        .ok_or_else(|| LoadError::InvalidValue {
            row,
            column: column.to_string(),
            value: String::new(),
        })
}

fn parse_degrees(row: usize, column: &str, raw: &str) -> LoadResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| LoadError::InvalidValue {
            row,
            column: column.to_string(),
            value: raw.to_string(),
        })
}
