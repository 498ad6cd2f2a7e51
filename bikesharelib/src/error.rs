//! Error types for bikesharelib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading trip data
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// Failed to open a city's data file
    #[error("failed to open data file '{path}': {source}")]
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The CSV reader rejected the file
    #[error("failed to read CSV '{path}': {source}")]
    Csv { path: PathBuf, source: csv::Error },

    /// A required column is absent from the header row
    #[error("missing column '{column}' in '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    /// A start timestamp could not be parsed
    #[error("invalid timestamp '{value}' on line {line} of '{path}'")]
    InvalidTimestamp {
        path: PathBuf,
        line: u64,
        value: String,
    },

    /// A numeric cell could not be parsed
    #[error("invalid {column} '{value}' on line {line} of '{path}'")]
    InvalidNumber {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },

    /// City key not present in the registry
    #[error("unknown city: {0}")]
    UnknownCity(String),
}
