use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The five tables a dataset is exported and loaded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    Customers,
    Products,
    Orders,
    OrderItems,
    Reviews,
}

/// Insertion order satisfying every foreign key.
pub const LOAD_ORDER: [TableName; 5] = [
    TableName::Customers,
    TableName::Products,
    TableName::Orders,
    TableName::OrderItems,
    TableName::Reviews,
];

impl TableName {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Customers => "customers",
            TableName::Products => "products",
            TableName::Orders => "orders",
            TableName::OrderItems => "order_items",
            TableName::Reviews => "reviews",
        }
    }

    pub fn csv_file_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }

    /// Column names in export order; the first one is the primary key.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            TableName::Customers => &["customer_id", "name", "email", "signup_date"],
            TableName::Products => &["product_id", "name", "category", "price"],
            TableName::Orders => &["order_id", "customer_id", "order_date", "total_amount"],
            TableName::OrderItems => &[
                "order_item_id",
                "order_id",
                "product_id",
                "quantity",
                "price",
            ],
            TableName::Reviews => &[
                "review_id",
                "product_id",
                "customer_id",
                "rating",
                "review_text",
                "review_date",
            ],
        }
    }

    /// Tables that must be loaded before this one.
    pub fn parents(&self) -> &'static [TableName] {
        match self {
            TableName::Customers | TableName::Products => &[],
            TableName::Orders => &[TableName::Customers],
            TableName::OrderItems => &[TableName::Orders, TableName::Products],
            TableName::Reviews => &[TableName::Products, TableName::Customers],
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        LOAD_ORDER
            .iter()
            .copied()
            .find(|table| table.as_str() == value)
            .ok_or_else(|| Error::UnknownTable(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_order_places_parents_first() {
        for (idx, table) in LOAD_ORDER.iter().enumerate() {
            for parent in table.parents() {
                let parent_idx = LOAD_ORDER.iter().position(|t| t == parent).unwrap();
                assert!(parent_idx < idx, "{parent} must load before {table}");
            }
        }
    }

    #[test]
    fn parses_table_names() {
        assert_eq!("order_items".parse::<TableName>().unwrap(), TableName::OrderItems);
        assert!("carts".parse::<TableName>().is_err());
    }

    #[test]
    fn serializes_as_snake_case_table_name() {
        let json = serde_json::to_string(&TableName::OrderItems).unwrap();
        assert_eq!(json, "\"order_items\"");
        for table in LOAD_ORDER {
            let json = serde_json::to_value(table).unwrap();
            assert_eq!(json, table.as_str());
            assert_eq!(serde_json::from_value::<TableName>(json).unwrap(), table);
        }
    }
}
