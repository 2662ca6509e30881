use std::path::Path;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::errors::LoadError;

/// Open (and create) the SQLite database at `path` with foreign keys enforced.
///
/// With `reset`, an existing database file is removed first.
pub async fn open_database(path: &Path, reset: bool) -> Result<SqlitePool, LoadError> {
    if reset && path.exists() {
        std::fs::remove_file(path)?;
        info!(path = %path.display(), "removed existing database");
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    info!(path = %path.display(), "database opened");
    Ok(pool)
}
