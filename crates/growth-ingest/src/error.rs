//! Error types for reference table ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a raw reference file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Reference file does not exist.
    #[error("reference file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected a record.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Structural problems that make a raw table unusable.
///
/// Row-level defects never produce an error; they are dropped and counted
/// in the [`NormalizeReport`](crate::NormalizeReport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The file held no header row.
    #[error("reference table is empty")]
    EmptyTable,

    /// Required columns could not be identified from the header.
    #[error("missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
