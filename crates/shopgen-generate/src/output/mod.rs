pub mod csv;

use std::path::Path;

use shopgen_core::{Dataset, LOAD_ORDER, TableName};

use self::csv::write_table_csv;
use crate::errors::GenerationError;
use crate::model::TableReport;

/// Write every entity set of `dataset` as `<table>.csv` under `dir`.
pub fn export_dataset(dataset: &Dataset, dir: &Path) -> Result<Vec<TableReport>, GenerationError> {
    std::fs::create_dir_all(dir)?;

    let mut reports = Vec::with_capacity(LOAD_ORDER.len());
    for table in LOAD_ORDER {
        let file = table.csv_file_name();
        let path = dir.join(&file);
        let (rows, bytes_written) = match table {
            TableName::Customers => (
                dataset.customers.len(),
                write_table_csv(&path, table, &dataset.customers)?,
            ),
            TableName::Products => (
                dataset.products.len(),
                write_table_csv(&path, table, &dataset.products)?,
            ),
            TableName::Orders => (
                dataset.orders.len(),
                write_table_csv(&path, table, &dataset.orders)?,
            ),
            TableName::OrderItems => (
                dataset.order_items.len(),
                write_table_csv(&path, table, &dataset.order_items)?,
            ),
            TableName::Reviews => (
                dataset.reviews.len(),
                write_table_csv(&path, table, &dataset.reviews)?,
            ),
        };
        tracing::debug!(table = %table, rows, bytes_written, path = %path.display(), "table exported");
        reports.push(TableReport {
            table,
            file,
            rows: rows as u64,
            bytes_written,
        });
    }

    Ok(reports)
}
