use thiserror::Error;

/// Errors that abort a load.
///
/// Row-level constraint failures are not errors; they are recorded in the
/// table's [`crate::TableLoadReport`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid csv {path}: {message}")]
    InvalidCsv { path: String, message: String },
}
