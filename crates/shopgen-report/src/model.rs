use chrono::NaiveDate;
use serde::Serialize;

/// One (customer, order, product) line of the report.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ReportRow {
    pub customer_name: String,
    pub order_date: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    /// Average rating across all reviews of the product; 0 when unreviewed.
    pub avg_rating: f64,
    pub review_count: i64,
}

/// Distinct counts over the orders in the report window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total_orders: i64,
    pub total_customers: i64,
    pub total_products: i64,
    pub products_with_reviews: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerOrderReport {
    pub cutoff: NaiveDate,
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
}
