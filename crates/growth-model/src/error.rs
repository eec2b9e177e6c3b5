use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown sex: {0}")]
    UnknownSex(String),
    #[error("unknown age band: {0}")]
    UnknownAgeBand(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
