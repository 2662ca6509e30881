//! SQLite persistence for generated shopgen datasets.
//!
//! Creates the five-table schema and bulk loads rows either from the CSV
//! export or straight from an in-memory [`shopgen_core::Dataset`]. Tables are
//! loaded parents-first, one transaction per table.

mod connect;
mod errors;
mod loader;
mod schema;

pub use connect::open_database;
pub use errors::LoadError;
pub use loader::{LoadReport, RowError, TableLoadReport, count_rows, load_csv_dir, load_dataset};
pub use schema::{create_schema, create_table_sql, insert_sql};
