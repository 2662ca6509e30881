use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::tables::TableName;
use crate::validation::{IntegrityViolation, validate_dataset};

/// A registered shopper. `email` is derived from `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
    pub email: String,
    pub signup_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: i64,
    pub name: String,
    pub category: String,
    /// Unit price in currency units, rounded to cents.
    pub price: f64,
}

/// An order header. `total_amount` is sampled on its own and does not match
/// the sum of the order's item prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: i64,
    pub customer_id: i64,
    pub order_date: NaiveDate,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_item_id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: u32,
    /// Line price: unit price times quantity, rounded to cents.
    pub price: f64,
}

/// A product review. The reviewer is a customer with at least one order, but
/// not necessarily one who bought the reviewed product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: i64,
    pub product_id: i64,
    pub customer_id: i64,
    pub rating: u8,
    pub review_text: String,
    pub review_date: NaiveDate,
}

/// The five entity sets produced by one generation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub reviews: Vec<Review>,
}

/// Row counts per entity set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetCounts {
    pub customers: u64,
    pub products: u64,
    pub orders: u64,
    pub order_items: u64,
    pub reviews: u64,
}

impl DatasetCounts {
    pub fn get(&self, table: TableName) -> u64 {
        match table {
            TableName::Customers => self.customers,
            TableName::Products => self.products,
            TableName::Orders => self.orders,
            TableName::OrderItems => self.order_items,
            TableName::Reviews => self.reviews,
        }
    }
}

impl Dataset {
    pub fn counts(&self) -> DatasetCounts {
        DatasetCounts {
            customers: self.customers.len() as u64,
            products: self.products.len() as u64,
            orders: self.orders.len() as u64,
            order_items: self.order_items.len() as u64,
            reviews: self.reviews.len() as u64,
        }
    }

    /// Check referential, temporal and uniqueness invariants.
    pub fn validate(&self) -> Vec<IntegrityViolation> {
        validate_dataset(self)
    }
}
