//! scanline-io - Data loading for survey comparison
//!
//! Loads discontinuity-survey field measurements from CSV or XLSX files,
//! builds the method-estimate table (synthetic when no real method output is
//! supplied), and optionally loads GeoJSON plane outlines for the map plot.
//!
//! The {A,B,C,D} plane letter codes appearing in field sheets and geo layers
//! are resolved through one shared lookup table in [`plane_code`].

pub mod geo;
pub mod plane_code;
pub mod reader;
pub mod survey;
pub mod synth;

mod csv_reader;
mod xlsx_reader;

pub use geo::*;
pub use plane_code::*;
pub use reader::*;
pub use survey::*;
pub use synth::*;

use thiserror::Error;

/// Errors that can occur while loading input tables
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Field data file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Missing required columns: {0:?}")]
    MissingColumns(Vec<String>),

    #[error("Row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
}

/// Result type for loading operations
pub type LoadResult<T> = Result<T, LoadError>;
