use thiserror::Error;

/// Core error type shared across shopgen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A date range cannot satisfy the minimum offset invariants.
    #[error("invalid date range: {0}")]
    InvalidRange(String),
    /// A table name that is not part of the dataset layout.
    #[error("unknown table: {0}")]
    UnknownTable(String),
}

/// Convenience alias for results returned by shopgen crates.
pub type Result<T> = std::result::Result<T, Error>;
