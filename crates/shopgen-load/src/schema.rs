use sqlx::SqlitePool;
use tracing::info;

use shopgen_core::{LOAD_ORDER, TableName};

use crate::errors::LoadError;

/// DDL for one table, including its primary and foreign keys.
pub fn create_table_sql(table: TableName) -> &'static str {
    match table {
        TableName::Customers => {
            r#"
            CREATE TABLE IF NOT EXISTS customers (
                customer_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                signup_date DATE NOT NULL
            )
            "#
        }
        TableName::Products => {
            r#"
            CREATE TABLE IF NOT EXISTS products (
                product_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                price REAL NOT NULL
            )
            "#
        }
        TableName::Orders => {
            r#"
            CREATE TABLE IF NOT EXISTS orders (
                order_id INTEGER PRIMARY KEY,
                customer_id INTEGER NOT NULL,
                order_date DATE NOT NULL,
                total_amount REAL NOT NULL,
                FOREIGN KEY (customer_id) REFERENCES customers(customer_id)
            )
            "#
        }
        TableName::OrderItems => {
            r#"
            CREATE TABLE IF NOT EXISTS order_items (
                order_item_id INTEGER PRIMARY KEY,
                order_id INTEGER NOT NULL,
                product_id INTEGER NOT NULL,
                quantity INTEGER NOT NULL,
                price REAL NOT NULL,
                FOREIGN KEY (order_id) REFERENCES orders(order_id),
                FOREIGN KEY (product_id) REFERENCES products(product_id)
            )
            "#
        }
        TableName::Reviews => {
            r#"
            CREATE TABLE IF NOT EXISTS reviews (
                review_id INTEGER PRIMARY KEY,
                product_id INTEGER NOT NULL,
                customer_id INTEGER NOT NULL,
                rating INTEGER NOT NULL CHECK (rating >= 1 AND rating <= 5),
                review_text TEXT,
                review_date DATE NOT NULL,
                FOREIGN KEY (product_id) REFERENCES products(product_id),
                FOREIGN KEY (customer_id) REFERENCES customers(customer_id)
            )
            "#
        }
    }
}

/// Parameterized insert covering every column of `table` in export order.
pub fn insert_sql(table: TableName) -> String {
    let columns = table.columns();
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({placeholders})",
        table.as_str(),
        columns.join(", ")
    )
}

/// Create all five tables in dependency order.
pub async fn create_schema(pool: &SqlitePool) -> Result<(), LoadError> {
    let mut tx = pool.begin().await?;
    for table in LOAD_ORDER {
        sqlx::query(create_table_sql(table)).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    info!(tables = LOAD_ORDER.len(), "database schema created");
    Ok(())
}
