//! CSV survey file reader

use std::fs::File;
use std::io::BufReader;

use crate::survey::{column_indexes, measurement_from_cells, FieldMeasurement};
use crate::{LoadError, LoadResult};

/// Load field measurements from a CSV file with a header row
pub fn load_survey_csv(path: &str) -> LoadResult<Vec<FieldMeasurement>> {
    let file = File::open(path).map_err(|e| LoadError::OpenFailed(e.to_string()))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::InvalidFormat(e.to_string()))?
        .iter()
        .map(|s| s.to_string())
        .collect();
    let indexes = column_indexes(&headers)?;

    let mut measurements = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|e| LoadError::InvalidFormat(e.to_string()))?;
        let cells: Vec<String> = record.iter().map(|s| s.to_string()).collect();
        measurements.push(measurement_from_cells(i + 1, &cells, indexes)?);
    }

    Ok(measurements)
}
