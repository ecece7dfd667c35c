//! Error types for the comparison engine

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the comparison itself
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompareError {
    /// Either input table has zero rows
    #[error("Input tables are empty")]
    EmptyInput,

    /// No (config, plane, method) combination had matching field data
    #[error("No comparable data: no (config, plane, method) intersection")]
    NoComparableData,
}

/// Errors from writing the result files
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create output directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write workbook '{path}': {message}")]
    Workbook { path: PathBuf, message: String },

    #[error("Failed to write CSV '{path}': {message}")]
    Csv { path: PathBuf, message: String },
}

/// Result type for comparison operations
pub type CompareResult<T> = Result<T, CompareError>;

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
