#![deny(unsafe_code)]

use std::path::PathBuf;

use growth_ingest::{IngestError, NormalizeError};
use growth_model::TableKey;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML manifest {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid manifest: {message}")]
    InvalidManifest { message: String },

    #[error("invalid manifest path {path}: {message}")]
    InvalidPath { path: PathBuf, message: String },

    #[error("sha256 mismatch for {path} (expected {expected}, got {actual})")]
    Sha256Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("failed to normalize {path}: {source}")]
    Normalize {
        path: PathBuf,
        #[source]
        source: NormalizeError,
    },

    #[error("reference table {key} unavailable: {reason}")]
    Unavailable { key: TableKey, reason: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
