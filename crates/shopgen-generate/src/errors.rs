use thiserror::Error;

/// Errors emitted by the dataset generator.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid date range: {0}")]
    InvalidRange(String),
    #[error("insufficient pool: {0}")]
    InsufficientPool(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("generated dataset has {0} integrity violations")]
    Integrity(usize),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<shopgen_core::Error> for GenerationError {
    fn from(value: shopgen_core::Error) -> Self {
        match value {
            shopgen_core::Error::InvalidRange(msg) => GenerationError::InvalidRange(msg),
            other => GenerationError::InvalidConfig(other.to_string()),
        }
    }
}
