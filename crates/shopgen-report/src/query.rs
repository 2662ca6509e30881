use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, info};

use shopgen_core::dates::DATE_FORMAT;

use crate::errors::ReportError;
use crate::model::{CustomerOrderReport, ReportRow, ReportSummary};

/// Length of the report window, counted back from the latest order.
pub const REPORT_WINDOW_DAYS: i64 = 90;

const REPORT_SQL: &str = r#"
    SELECT
        c.name AS customer_name,
        o.order_date AS order_date,
        p.name AS product_name,
        oi.quantity AS quantity,
        ROUND(p.price, 2) AS unit_price,
        ROUND(COALESCE(AVG(r.rating), 0), 2) AS avg_rating,
        COUNT(r.review_id) AS review_count
    FROM orders o
    INNER JOIN customers c ON o.customer_id = c.customer_id
    INNER JOIN order_items oi ON o.order_id = oi.order_id
    INNER JOIN products p ON oi.product_id = p.product_id
    LEFT JOIN reviews r ON p.product_id = r.product_id
    WHERE o.order_date >= ?
    GROUP BY c.customer_id, o.order_id, o.order_date, p.product_id, p.name, oi.quantity, p.price
    ORDER BY o.order_date DESC, c.name, p.name
"#;

/// `latest - 90 days`, or `today - 90 days` when there are no orders.
pub fn cutoff_from(latest_order: Option<NaiveDate>, today: NaiveDate) -> NaiveDate {
    latest_order.unwrap_or(today) - chrono::Duration::days(REPORT_WINDOW_DAYS)
}

/// Read the latest order date and derive the report cutoff from it.
pub async fn resolve_cutoff(pool: &SqlitePool, today: NaiveDate) -> Result<NaiveDate, ReportError> {
    let latest = sqlx::query_scalar::<_, Option<String>>("SELECT MAX(order_date) FROM orders")
        .fetch_one(pool)
        .await?;

    let latest = latest.map(|value| parse_date(&value)).transpose()?;
    let cutoff = cutoff_from(latest, today);
    debug!(latest = ?latest, cutoff = %cutoff, "report cutoff resolved");
    Ok(cutoff)
}

pub async fn fetch_report_rows(
    pool: &SqlitePool,
    cutoff: NaiveDate,
) -> Result<Vec<ReportRow>, ReportError> {
    let rows = sqlx::query_as::<_, ReportRow>(REPORT_SQL)
        .bind(cutoff.format(DATE_FORMAT).to_string())
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn fetch_summary(
    pool: &SqlitePool,
    cutoff: NaiveDate,
) -> Result<ReportSummary, ReportError> {
    let cutoff = cutoff.format(DATE_FORMAT).to_string();

    let total_orders = scalar(
        pool,
        "SELECT COUNT(DISTINCT o.order_id) FROM orders o WHERE o.order_date >= ?",
        &cutoff,
    )
    .await?;
    let total_customers = scalar(
        pool,
        "SELECT COUNT(DISTINCT o.customer_id) FROM orders o WHERE o.order_date >= ?",
        &cutoff,
    )
    .await?;
    let total_products = scalar(
        pool,
        r#"
        SELECT COUNT(DISTINCT oi.product_id)
        FROM orders o
        INNER JOIN order_items oi ON o.order_id = oi.order_id
        WHERE o.order_date >= ?
        "#,
        &cutoff,
    )
    .await?;
    let products_with_reviews = scalar(
        pool,
        r#"
        SELECT COUNT(DISTINCT p.product_id)
        FROM orders o
        INNER JOIN order_items oi ON o.order_id = oi.order_id
        INNER JOIN products p ON oi.product_id = p.product_id
        INNER JOIN reviews r ON p.product_id = r.product_id
        WHERE o.order_date >= ?
        "#,
        &cutoff,
    )
    .await?;

    Ok(ReportSummary {
        total_orders,
        total_customers,
        total_products,
        products_with_reviews,
    })
}

/// Resolve the cutoff, then fetch rows and summary for it.
pub async fn build_report(
    pool: &SqlitePool,
    today: NaiveDate,
) -> Result<CustomerOrderReport, ReportError> {
    let cutoff = resolve_cutoff(pool, today).await?;
    let rows = fetch_report_rows(pool, cutoff).await?;
    let summary = fetch_summary(pool, cutoff).await?;

    info!(
        cutoff = %cutoff,
        rows = rows.len(),
        orders = summary.total_orders,
        customers = summary.total_customers,
        "report built"
    );

    Ok(CustomerOrderReport {
        cutoff,
        rows,
        summary,
    })
}

async fn scalar(pool: &SqlitePool, sql: &str, cutoff: &str) -> Result<i64, ReportError> {
    let value = sqlx::query_scalar::<_, i64>(sql)
        .bind(cutoff)
        .fetch_one(pool)
        .await?;
    Ok(value)
}

fn parse_date(value: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| ReportError::InvalidDate {
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cutoff_counts_back_from_latest_order() {
        assert_eq!(
            cutoff_from(Some(date(2024, 12, 30)), date(2026, 1, 1)),
            date(2024, 10, 1)
        );
    }

    #[test]
    fn cutoff_falls_back_to_today() {
        assert_eq!(cutoff_from(None, date(2025, 4, 1)), date(2025, 1, 1));
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(matches!(
            parse_date("yesterday"),
            Err(ReportError::InvalidDate { .. })
        ));
    }
}
