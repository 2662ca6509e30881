use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{
    MAX_ITEMS_PER_ORDER, MAX_QUANTITY, MAX_RATING, MIN_ITEMS_PER_ORDER, MIN_QUANTITY, MIN_RATING,
    PRODUCT_PRICE_MAX, PRODUCT_PRICE_MIN, round_currency,
};
use crate::dates::{ORDER_OFFSET_DAYS, REVIEW_OFFSET_DAYS};
use crate::model::Dataset;
use crate::tables::TableName;

/// A single broken invariant, anchored to the row that breaks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityViolation {
    pub table: TableName,
    pub row_id: i64,
    pub code: String,
    pub message: String,
}

impl IntegrityViolation {
    fn new(table: TableName, row_id: i64, code: &str, message: String) -> Self {
        Self {
            table,
            row_id,
            code: code.to_string(),
            message,
        }
    }
}

/// Validate internal consistency of a generated dataset.
///
/// This checks:
/// - primary keys are unique per table
/// - every foreign key resolves
/// - orders and reviews happen after the customer's signup
/// - each order has 1-4 items over distinct products
/// - value ranges for prices, quantities and ratings
/// - no customer reviews the same product twice
pub fn validate_dataset(dataset: &Dataset) -> Vec<IntegrityViolation> {
    let mut violations = Vec::new();

    let signups: BTreeMap<i64, NaiveDate> = dataset
        .customers
        .iter()
        .map(|customer| (customer.customer_id, customer.signup_date))
        .collect();
    let prices: BTreeMap<i64, f64> = dataset
        .products
        .iter()
        .map(|product| (product.product_id, product.price))
        .collect();
    let order_ids: BTreeSet<i64> = dataset.orders.iter().map(|order| order.order_id).collect();

    check_unique_ids(
        TableName::Customers,
        dataset.customers.iter().map(|c| c.customer_id),
        &mut violations,
    );
    check_unique_ids(
        TableName::Products,
        dataset.products.iter().map(|p| p.product_id),
        &mut violations,
    );
    check_unique_ids(
        TableName::Orders,
        dataset.orders.iter().map(|o| o.order_id),
        &mut violations,
    );
    check_unique_ids(
        TableName::OrderItems,
        dataset.order_items.iter().map(|i| i.order_item_id),
        &mut violations,
    );
    check_unique_ids(
        TableName::Reviews,
        dataset.reviews.iter().map(|r| r.review_id),
        &mut violations,
    );

    for product in &dataset.products {
        if !(PRODUCT_PRICE_MIN..=PRODUCT_PRICE_MAX).contains(&product.price) {
            violations.push(IntegrityViolation::new(
                TableName::Products,
                product.product_id,
                "price_out_of_range",
                format!("price {} outside [{PRODUCT_PRICE_MIN}, {PRODUCT_PRICE_MAX}]", product.price),
            ));
        }
    }

    for order in &dataset.orders {
        match signups.get(&order.customer_id) {
            None => violations.push(missing_fk(
                TableName::Orders,
                order.order_id,
                TableName::Customers,
                order.customer_id,
            )),
            Some(signup) => {
                if order.order_date <= *signup + chrono::Duration::days(ORDER_OFFSET_DAYS - 1) {
                    violations.push(IntegrityViolation::new(
                        TableName::Orders,
                        order.order_id,
                        "order_before_signup",
                        format!(
                            "order_date {} is not after signup_date {}",
                            order.order_date, signup
                        ),
                    ));
                }
            }
        }
    }

    let mut products_by_order: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
    for item in &dataset.order_items {
        if !order_ids.contains(&item.order_id) {
            violations.push(missing_fk(
                TableName::OrderItems,
                item.order_item_id,
                TableName::Orders,
                item.order_id,
            ));
        }
        match prices.get(&item.product_id) {
            None => violations.push(missing_fk(
                TableName::OrderItems,
                item.order_item_id,
                TableName::Products,
                item.product_id,
            )),
            Some(unit_price) => {
                let expected = round_currency(unit_price * f64::from(item.quantity));
                if (expected - item.price).abs() > 0.005 {
                    violations.push(IntegrityViolation::new(
                        TableName::OrderItems,
                        item.order_item_id,
                        "line_price_mismatch",
                        format!("price {} != {unit_price} x {}", item.price, item.quantity),
                    ));
                }
            }
        }
        if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&item.quantity) {
            violations.push(IntegrityViolation::new(
                TableName::OrderItems,
                item.order_item_id,
                "quantity_out_of_range",
                format!("quantity {} outside [{MIN_QUANTITY}, {MAX_QUANTITY}]", item.quantity),
            ));
        }
        products_by_order
            .entry(item.order_id)
            .or_default()
            .push(item.product_id);
    }

    for order in &dataset.orders {
        let products = products_by_order
            .get(&order.order_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        if !(MIN_ITEMS_PER_ORDER..=MAX_ITEMS_PER_ORDER).contains(&products.len()) {
            violations.push(IntegrityViolation::new(
                TableName::Orders,
                order.order_id,
                "item_count_out_of_range",
                format!(
                    "order has {} items, expected {MIN_ITEMS_PER_ORDER}-{MAX_ITEMS_PER_ORDER}",
                    products.len()
                ),
            ));
        }
        let distinct: HashSet<i64> = products.iter().copied().collect();
        if distinct.len() != products.len() {
            violations.push(IntegrityViolation::new(
                TableName::Orders,
                order.order_id,
                "duplicate_order_product",
                "order repeats a product across items".to_string(),
            ));
        }
    }

    let mut review_pairs = HashSet::new();
    for review in &dataset.reviews {
        if !prices.contains_key(&review.product_id) {
            violations.push(missing_fk(
                TableName::Reviews,
                review.review_id,
                TableName::Products,
                review.product_id,
            ));
        }
        match signups.get(&review.customer_id) {
            None => violations.push(missing_fk(
                TableName::Reviews,
                review.review_id,
                TableName::Customers,
                review.customer_id,
            )),
            Some(signup) => {
                if review.review_date <= *signup + chrono::Duration::days(REVIEW_OFFSET_DAYS) {
                    violations.push(IntegrityViolation::new(
                        TableName::Reviews,
                        review.review_id,
                        "review_too_early",
                        format!(
                            "review_date {} is not more than {REVIEW_OFFSET_DAYS} days after signup_date {}",
                            review.review_date, signup
                        ),
                    ));
                }
            }
        }
        if !(MIN_RATING..=MAX_RATING).contains(&review.rating) {
            violations.push(IntegrityViolation::new(
                TableName::Reviews,
                review.review_id,
                "rating_out_of_range",
                format!("rating {} outside [{MIN_RATING}, {MAX_RATING}]", review.rating),
            ));
        }
        if !review_pairs.insert((review.product_id, review.customer_id)) {
            violations.push(IntegrityViolation::new(
                TableName::Reviews,
                review.review_id,
                "duplicate_review_pair",
                format!(
                    "customer {} already reviewed product {}",
                    review.customer_id, review.product_id
                ),
            ));
        }
    }

    violations
}

fn check_unique_ids(
    table: TableName,
    ids: impl Iterator<Item = i64>,
    violations: &mut Vec<IntegrityViolation>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            violations.push(IntegrityViolation::new(
                table,
                id,
                "duplicate_primary_key",
                format!("{table} id {id} appears more than once"),
            ));
        }
    }
}

fn missing_fk(table: TableName, row_id: i64, parent: TableName, key: i64) -> IntegrityViolation {
    IntegrityViolation::new(
        table,
        row_id,
        "missing_foreign_key",
        format!("{parent} id {key} does not exist"),
    )
}
