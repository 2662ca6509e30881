use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use shopgen_core::{Customer, Dataset, Order, OrderItem, Product, Review};
use shopgen_generate::{GenerateConfig, generate_dataset};
use shopgen_load::{create_schema, load_dataset, open_database};
use shopgen_report::{build_report, render_report};
use sqlx::SqlitePool;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

async fn fresh_database(label: &str) -> SqlitePool {
    let mut dir = std::env::temp_dir();
    dir.push(format!("shopgen_report_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp dir");
    let path: PathBuf = dir.join("ecommerce.db");
    let pool = open_database(&path, true).await.expect("open database");
    create_schema(&pool).await.expect("create schema");
    pool
}

fn customer(id: i64, name: &str, signup: NaiveDate) -> Customer {
    Customer {
        customer_id: id,
        name: name.to_string(),
        email: format!("customer{id}@example.com"),
        signup_date: signup,
    }
}

fn product(id: i64, name: &str, price: f64) -> Product {
    Product {
        product_id: id,
        name: name.to_string(),
        category: "Home".to_string(),
        price,
    }
}

fn order(id: i64, customer_id: i64, order_date: NaiveDate) -> Order {
    Order {
        order_id: id,
        customer_id,
        order_date,
        total_amount: 100.0,
    }
}

fn item(id: i64, order_id: i64, product_id: i64, quantity: u32, unit: f64) -> OrderItem {
    OrderItem {
        order_item_id: id,
        order_id,
        product_id,
        quantity,
        price: unit * f64::from(quantity),
    }
}

fn review(id: i64, product_id: i64, customer_id: i64, rating: u8) -> Review {
    Review {
        review_id: id,
        product_id,
        customer_id,
        rating,
        review_text: "Great product!".to_string(),
        review_date: date(2024, 6, 1),
    }
}

fn small_dataset() -> Dataset {
    Dataset {
        customers: vec![
            customer(1, "Alice Smith", date(2023, 1, 1)),
            customer(2, "Bob Jones", date(2023, 2, 1)),
        ],
        products: vec![product(1, "Lamp Pro", 50.0), product(2, "Kettle Basic", 20.0)],
        orders: vec![
            order(1, 1, date(2024, 12, 30)),
            order(2, 2, date(2024, 11, 1)),
            order(3, 1, date(2024, 6, 1)),
        ],
        order_items: vec![
            item(1, 1, 1, 2, 50.0),
            item(2, 1, 2, 1, 20.0),
            item(3, 2, 1, 1, 50.0),
            item(4, 3, 2, 3, 20.0),
        ],
        reviews: vec![review(1, 1, 1, 4), review(2, 1, 2, 5)],
    }
}

#[tokio::test]
async fn report_covers_the_last_ninety_days() {
    let pool = fresh_database("window").await;
    load_dataset(&pool, &small_dataset()).await.expect("load");

    let report = build_report(&pool, date(2026, 1, 1)).await.expect("report");

    assert_eq!(report.cutoff, date(2024, 10, 1));
    let lines: Vec<(&str, &str, &str)> = report
        .rows
        .iter()
        .map(|row| {
            (
                row.order_date.as_str(),
                row.customer_name.as_str(),
                row.product_name.as_str(),
            )
        })
        .collect();
    assert_eq!(
        lines,
        vec![
            ("2024-12-30", "Alice Smith", "Kettle Basic"),
            ("2024-12-30", "Alice Smith", "Lamp Pro"),
            ("2024-11-01", "Bob Jones", "Lamp Pro"),
        ]
    );

    let lamp = &report.rows[1];
    assert_eq!(lamp.quantity, 2);
    assert_eq!(lamp.unit_price, 50.0);
    assert_eq!(lamp.avg_rating, 4.5);
    assert_eq!(lamp.review_count, 2);

    let kettle = &report.rows[0];
    assert_eq!(kettle.avg_rating, 0.0);
    assert_eq!(kettle.review_count, 0);

    assert_eq!(report.summary.total_orders, 2);
    assert_eq!(report.summary.total_customers, 2);
    assert_eq!(report.summary.total_products, 2);
    assert_eq!(report.summary.products_with_reviews, 1);

    let rendered = render_report(&report);
    assert!(rendered.contains("since 2024-10-01"));
    assert!(rendered.contains("N/A"));
    assert!(rendered.contains("Total records: 3"));
}

#[tokio::test]
async fn empty_database_uses_today() {
    let pool = fresh_database("empty").await;

    let report = build_report(&pool, date(2025, 4, 1)).await.expect("report");

    assert_eq!(report.cutoff, date(2025, 1, 1));
    assert!(report.rows.is_empty());
    assert_eq!(report.summary.total_orders, 0);
    assert!(render_report(&report).contains("No orders found in the last 90 days."));
}

#[tokio::test]
async fn generated_dataset_rows_respect_cutoff() {
    let pool = fresh_database("generated").await;
    let dataset = generate_dataset(&GenerateConfig::default()).expect("generate");
    load_dataset(&pool, &dataset).await.expect("load");

    let report = build_report(&pool, date(2026, 1, 1)).await.expect("report");

    let latest = dataset
        .orders
        .iter()
        .map(|order| order.order_date)
        .max()
        .expect("orders exist");
    assert_eq!(report.cutoff, latest - chrono::Duration::days(90));

    let in_window: Vec<i64> = dataset
        .orders
        .iter()
        .filter(|order| order.order_date >= report.cutoff)
        .map(|order| order.order_id)
        .collect();
    let expected_rows = dataset
        .order_items
        .iter()
        .filter(|item| in_window.contains(&item.order_id))
        .count();

    assert_eq!(report.rows.len(), expected_rows);
    assert_eq!(report.summary.total_orders, in_window.len() as i64);
    for row in &report.rows {
        let order_date = NaiveDate::parse_from_str(&row.order_date, "%Y-%m-%d").expect("date");
        assert!(order_date >= report.cutoff);
    }
    let dates: Vec<&str> = report.rows.iter().map(|row| row.order_date.as_str()).collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);
}
