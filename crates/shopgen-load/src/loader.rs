use std::fmt::Debug;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::error::ErrorKind;
use sqlx::sqlite::SqliteArguments;
use sqlx::{Sqlite, SqlitePool};
use tracing::{info, warn};

use shopgen_core::dates::DATE_FORMAT;
use shopgen_core::{Customer, Dataset, LOAD_ORDER, Order, OrderItem, Product, Review, TableName};

use crate::errors::LoadError;
use crate::schema::insert_sql;

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// A row the database refused, with its 1-based position in the source.
#[derive(Debug, Clone, Serialize)]
pub struct RowError {
    pub row: u64,
    pub message: String,
}

/// Outcome of loading one table.
#[derive(Debug, Clone, Serialize)]
pub struct TableLoadReport {
    pub table: TableName,
    pub source: Option<String>,
    pub skipped: bool,
    pub rows_read: u64,
    pub rows_inserted: u64,
    pub rows_rejected: u64,
    pub errors: Vec<RowError>,
}

impl TableLoadReport {
    fn new(table: TableName, source: Option<String>) -> Self {
        Self {
            table,
            source,
            skipped: false,
            rows_read: 0,
            rows_inserted: 0,
            rows_rejected: 0,
            errors: Vec::new(),
        }
    }

    fn reject(&mut self, row: u64, message: String) {
        self.rows_rejected += 1;
        self.errors.push(RowError { row, message });
    }
}

/// Outcome of loading all tables.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub tables: Vec<TableLoadReport>,
}

impl LoadReport {
    pub fn table(&self, table: TableName) -> Option<&TableLoadReport> {
        self.tables.iter().find(|report| report.table == table)
    }

    pub fn rows_inserted(&self) -> u64 {
        self.tables.iter().map(|table| table.rows_inserted).sum()
    }

    pub fn rows_rejected(&self) -> u64 {
        self.tables.iter().map(|table| table.rows_rejected).sum()
    }
}

/// A record that maps onto one table's insert statement.
trait TableRow: DeserializeOwned + Debug {
    const TABLE: TableName;

    fn bind<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}

impl TableRow for Customer {
    const TABLE: TableName = TableName::Customers;

    fn bind<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.customer_id)
            .bind(self.name.clone())
            .bind(self.email.clone())
            .bind(self.signup_date.format(DATE_FORMAT).to_string())
    }
}

impl TableRow for Product {
    const TABLE: TableName = TableName::Products;

    fn bind<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.product_id)
            .bind(self.name.clone())
            .bind(self.category.clone())
            .bind(self.price)
    }
}

impl TableRow for Order {
    const TABLE: TableName = TableName::Orders;

    fn bind<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.order_id)
            .bind(self.customer_id)
            .bind(self.order_date.format(DATE_FORMAT).to_string())
            .bind(self.total_amount)
    }
}

impl TableRow for OrderItem {
    const TABLE: TableName = TableName::OrderItems;

    fn bind<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.order_item_id)
            .bind(self.order_id)
            .bind(self.product_id)
            .bind(i64::from(self.quantity))
            .bind(self.price)
    }
}

impl TableRow for Review {
    const TABLE: TableName = TableName::Reviews;

    fn bind<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.review_id)
            .bind(self.product_id)
            .bind(self.customer_id)
            .bind(i64::from(self.rating))
            .bind(self.review_text.clone())
            .bind(self.review_date.format(DATE_FORMAT).to_string())
    }
}

/// Load `<table>.csv` files from `dir` in dependency order.
///
/// Missing files are skipped with a warning. Rows the database rejects are
/// logged and counted; anything else rolls back the current table.
pub async fn load_csv_dir(pool: &SqlitePool, dir: &Path) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();
    for table in LOAD_ORDER {
        let path = dir.join(table.csv_file_name());
        let table_report = match table {
            TableName::Customers => load_csv_table::<Customer>(pool, &path).await?,
            TableName::Products => load_csv_table::<Product>(pool, &path).await?,
            TableName::Orders => load_csv_table::<Order>(pool, &path).await?,
            TableName::OrderItems => load_csv_table::<OrderItem>(pool, &path).await?,
            TableName::Reviews => load_csv_table::<Review>(pool, &path).await?,
        };
        report.tables.push(table_report);
    }
    Ok(report)
}

/// Load an in-memory dataset in dependency order.
pub async fn load_dataset(pool: &SqlitePool, dataset: &Dataset) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();
    for table in LOAD_ORDER {
        let table_report = match table {
            TableName::Customers => load_rows(pool, owned(&dataset.customers), None).await?,
            TableName::Products => load_rows(pool, owned(&dataset.products), None).await?,
            TableName::Orders => load_rows(pool, owned(&dataset.orders), None).await?,
            TableName::OrderItems => load_rows(pool, owned(&dataset.order_items), None).await?,
            TableName::Reviews => load_rows(pool, owned(&dataset.reviews), None).await?,
        };
        report.tables.push(table_report);
    }
    Ok(report)
}

/// Row count per table, in load order.
pub async fn count_rows(pool: &SqlitePool) -> Result<Vec<(TableName, i64)>, LoadError> {
    let mut counts = Vec::with_capacity(LOAD_ORDER.len());
    for table in LOAD_ORDER {
        let sql = format!("SELECT COUNT(*) FROM {}", table.as_str());
        let count = sqlx::query_scalar::<_, i64>(&sql).fetch_one(pool).await?;
        counts.push((table, count));
    }
    Ok(counts)
}

async fn load_csv_table<T: TableRow>(
    pool: &SqlitePool,
    path: &Path,
) -> Result<TableLoadReport, LoadError> {
    let source = path.display().to_string();
    if !path.exists() {
        warn!(table = %T::TABLE, path = %source, "csv file not found, skipping");
        let mut report = TableLoadReport::new(T::TABLE, Some(source));
        report.skipped = true;
        return Ok(report);
    }

    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers != T::TABLE.columns() {
        return Err(LoadError::InvalidCsv {
            path: source,
            message: format!(
                "expected header {:?}, found {:?}",
                T::TABLE.columns(),
                headers
            ),
        });
    }

    let mut rows = Vec::new();
    for record in reader.deserialize::<T>() {
        match record {
            Ok(row) => rows.push(Ok(row)),
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => rows.push(Err(err.to_string())),
        }
    }

    load_rows(pool, rows, Some(source)).await
}

async fn load_rows<T: TableRow>(
    pool: &SqlitePool,
    rows: Vec<Result<T, String>>,
    source: Option<String>,
) -> Result<TableLoadReport, LoadError> {
    let table = T::TABLE;
    let sql = insert_sql(table);
    let mut report = TableLoadReport::new(table, source);

    let mut tx = pool.begin().await?;
    for (idx, row) in rows.into_iter().enumerate() {
        let position = idx as u64 + 1;
        report.rows_read += 1;

        let row = match row {
            Ok(row) => row,
            Err(message) => {
                warn!(table = %table, row = position, error = %message, "unreadable row skipped");
                report.reject(position, message);
                continue;
            }
        };

        match row.bind(sqlx::query(&sql)).execute(&mut *tx).await {
            Ok(_) => report.rows_inserted += 1,
            Err(sqlx::Error::Database(err)) if is_row_violation(err.kind(), err.message()) => {
                warn!(
                    table = %table,
                    row = position,
                    error = %err.message(),
                    data = ?row,
                    "row rejected"
                );
                report.reject(position, err.message().to_string());
            }
            Err(err) => return Err(err.into()),
        }
    }
    tx.commit().await?;

    info!(
        table = %table,
        rows_inserted = report.rows_inserted,
        rows_rejected = report.rows_rejected,
        "table loaded"
    );
    Ok(report)
}

fn is_row_violation(kind: ErrorKind, message: &str) -> bool {
    !matches!(kind, ErrorKind::Other) || message.contains("constraint failed")
}

fn owned<T: Clone>(rows: &[T]) -> Vec<Result<T, String>> {
    rows.iter().cloned().map(Ok).collect()
}
