//! Errors surfaced by the evaluation engine.

use thiserror::Error;

use growth_model::TableKey;
use growth_standards::StandardsError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Age, height or score outside the documented input domain.
    #[error("invalid query: {message}")]
    InvalidQuery { message: String },

    /// The table for this key is missing or structurally broken.
    #[error("reference table {key} unavailable: {reason}")]
    TableUnavailable { key: TableKey, reason: String },

    /// The table loaded but holds no usable rows.
    #[error("no reference row available in table {key}")]
    NoMatchingRow { key: TableKey },

    /// The transform produced NaN or infinity, or no height exists for the score.
    #[error("no finite result for table {key} at {age_months} months")]
    NonFiniteScore { key: TableKey, age_months: f64 },
}

impl EngineError {
    /// True when the reference data, not the input, prevented a result.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            EngineError::TableUnavailable { .. } | EngineError::NoMatchingRow { .. }
        )
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        EngineError::InvalidQuery {
            message: message.into(),
        }
    }

    pub(crate) fn from_store(key: TableKey, error: StandardsError) -> Self {
        match error {
            StandardsError::Unavailable { key, reason } => {
                EngineError::TableUnavailable { key, reason }
            }
            other => EngineError::TableUnavailable {
                key,
                reason: other.to_string(),
            },
        }
    }
}
