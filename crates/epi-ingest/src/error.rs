//! Error types for time-series ingestion.
//!
//! Everything here is fatal for a run. Unparseable data cells are not errors:
//! they read as zero and are only counted in [`crate::SeriesStats`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a wide time-series file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file does not exist.
    #[error("time series file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the input file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Structural Errors ===
    /// The CSV layer rejected the file (bad quoting, non-UTF-8 header).
    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A data row ends before the last header column.
    #[error("row at line {line} of {path} has {found} fields, header has {expected}")]
    ShortRow {
        path: PathBuf,
        line: u64,
        found: usize,
        expected: usize,
    },

    /// The file has no header row.
    #[error("time series file is empty: {path}")]
    EmptyFile { path: PathBuf },

    /// The header is too narrow to contain the country label column.
    #[error("header of {path} has {found} columns, expected the label in column {column}")]
    MissingColumn {
        path: PathBuf,
        column: usize,
        found: usize,
    },

    /// A header cell in the date range is not an `M/D/YY` date.
    #[error("invalid date '{value}' in header column {column} of {path}")]
    InvalidHeaderDate {
        path: PathBuf,
        column: usize,
        value: String,
    },

    /// The layout places the label inside the date range.
    #[error("label column {label_column} must precede first date column {first_date_column}")]
    InvalidLayout {
        label_column: usize,
        first_date_column: usize,
    },
}

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
