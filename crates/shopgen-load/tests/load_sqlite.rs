use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use shopgen_core::{Dataset, Order, TableName};
use shopgen_generate::{GenerateConfig, GenerateOptions, GenerationEngine, generate_dataset};
use shopgen_load::{
    LoadError, count_rows, create_schema, load_csv_dir, load_dataset, open_database,
};
use sqlx::SqlitePool;

fn temp_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("shopgen_load_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

async fn fresh_database(label: &str) -> SqlitePool {
    let path = temp_dir(label).join("ecommerce.db");
    let pool = open_database(&path, true).await.expect("open database");
    create_schema(&pool).await.expect("create schema");
    pool
}

async fn count(pool: &SqlitePool, table: TableName) -> i64 {
    count_rows(pool)
        .await
        .expect("count rows")
        .into_iter()
        .find(|(name, _)| *name == table)
        .map(|(_, count)| count)
        .expect("table count")
}

fn dataset() -> Dataset {
    generate_dataset(&GenerateConfig::default()).expect("generate dataset")
}

#[tokio::test]
async fn loads_generated_dataset() {
    let pool = fresh_database("dataset").await;
    let dataset = dataset();

    let report = load_dataset(&pool, &dataset).await.expect("load dataset");

    assert_eq!(report.rows_rejected(), 0);
    let counts = dataset.counts();
    for (table, rows) in count_rows(&pool).await.expect("count rows") {
        assert_eq!(rows as u64, counts.get(table), "{table}");
    }
}

#[tokio::test]
async fn loads_exported_csv_directory() {
    let out_dir = temp_dir("csv_out");
    let result = GenerationEngine::new(GenerateOptions {
        out_dir: out_dir.clone(),
        strict: true,
        run_id: None,
    })
    .run(&GenerateConfig::default())
    .expect("generate csv");

    let pool = fresh_database("csv").await;
    let report = load_csv_dir(&pool, &out_dir).await.expect("load csv dir");

    assert_eq!(report.tables.len(), 5);
    assert_eq!(report.rows_rejected(), 0);
    assert_eq!(report.rows_inserted(), {
        let counts = result.dataset.counts();
        counts.customers + counts.products + counts.orders + counts.order_items + counts.reviews
    });
    let stored: f64 = sqlx::query_scalar("SELECT price FROM products WHERE product_id = 1")
        .fetch_one(&pool)
        .await
        .expect("read price");
    assert_eq!(stored, result.dataset.products[0].price);
}

#[tokio::test]
async fn duplicate_rows_are_rejected_per_row() {
    let pool = fresh_database("duplicates").await;
    let dataset = dataset();

    load_dataset(&pool, &dataset).await.expect("first load");
    let report = load_dataset(&pool, &dataset).await.expect("second load");

    let customers = report.table(TableName::Customers).expect("customers report");
    assert_eq!(customers.rows_inserted, 0);
    assert_eq!(customers.rows_rejected, dataset.customers.len() as u64);
    assert_eq!(customers.errors[0].row, 1);
    assert_eq!(count(&pool, TableName::Customers).await, 30);
}

#[tokio::test]
async fn dangling_foreign_key_rejects_only_that_row() {
    let pool = fresh_database("fk").await;
    let mut dataset = dataset();
    dataset.order_items.clear();
    dataset.reviews.clear();
    dataset.orders.push(Order {
        order_id: 999,
        customer_id: 4242,
        order_date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("date"),
        total_amount: 10.0,
    });

    let report = load_dataset(&pool, &dataset).await.expect("load dataset");

    let orders = report.table(TableName::Orders).expect("orders report");
    assert_eq!(orders.rows_rejected, 1);
    assert_eq!(orders.rows_inserted, 25);
    assert_eq!(orders.errors[0].row, 26);
    assert_eq!(count(&pool, TableName::Orders).await, 25);
}

#[tokio::test]
async fn out_of_range_rating_violates_check() {
    let pool = fresh_database("rating").await;
    let mut dataset = dataset();
    let mut review = dataset.reviews[0].clone();
    review.review_id = 500;
    review.rating = 9;
    review.product_id = dataset.products.last().expect("product").product_id;
    dataset.reviews.push(review);

    let report = load_dataset(&pool, &dataset).await.expect("load dataset");
    let reviews = report.table(TableName::Reviews).expect("reviews report");
    assert_eq!(reviews.rows_rejected, 1);
    assert_eq!(
        count(&pool, TableName::Reviews).await as usize,
        dataset.reviews.len() - 1
    );
}

#[tokio::test]
async fn missing_csv_files_are_skipped() {
    let dir = temp_dir("missing");
    let pool = fresh_database("missing_db").await;

    let report = load_csv_dir(&pool, &dir).await.expect("load empty dir");

    assert!(report.tables.iter().all(|table| table.skipped));
    assert_eq!(report.rows_inserted(), 0);
}

#[tokio::test]
async fn malformed_header_aborts_the_table() {
    let dir = temp_dir("header");
    fs::write(
        dir.join("customers.csv"),
        "id,name,email,signup_date\n1,Mary Smith,mary.smith@gmail.com,2021-02-03\n",
    )
    .expect("write csv");
    let pool = fresh_database("header_db").await;

    let result = load_csv_dir(&pool, &dir).await;

    assert!(matches!(result, Err(LoadError::InvalidCsv { .. })));
    assert_eq!(count(&pool, TableName::Customers).await, 0);
}

#[tokio::test]
async fn unreadable_rows_are_counted_not_fatal() {
    let dir = temp_dir("unreadable");
    fs::write(
        dir.join("customers.csv"),
        "customer_id,name,email,signup_date\n\
         1,Mary Smith,mary.smith@gmail.com,2021-02-03\n\
         2,John Lee,john.lee@email.com,not-a-date\n",
    )
    .expect("write csv");
    let pool = fresh_database("unreadable_db").await;

    let report = load_csv_dir(&pool, &dir).await.expect("load csv dir");
    let customers = report.table(TableName::Customers).expect("customers report");

    assert_eq!(customers.rows_read, 2);
    assert_eq!(customers.rows_inserted, 1);
    assert_eq!(customers.rows_rejected, 1);
}

#[tokio::test]
async fn reset_discards_previous_database() {
    let path = temp_dir("reset").join("ecommerce.db");
    {
        let pool = open_database(&path, true).await.expect("open database");
        create_schema(&pool).await.expect("create schema");
        load_dataset(&pool, &dataset()).await.expect("load dataset");
        pool.close().await;
    }

    let pool = open_database(&path, true).await.expect("reopen database");
    create_schema(&pool).await.expect("create schema");
    assert_eq!(count(&pool, TableName::Customers).await, 0);
}
