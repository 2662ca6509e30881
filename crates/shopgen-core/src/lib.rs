//! Core contracts and helpers for shopgen.
//!
//! This crate defines the entity records, the static sampling pools, the
//! table layout and the integrity checks shared by the generator, the SQLite
//! loader and the report query.

pub mod catalog;
pub mod dates;
pub mod error;
pub mod model;
pub mod tables;
pub mod validation;

pub use dates::{DateRange, DayWindow};
pub use error::{Error, Result};
pub use model::{Customer, Dataset, DatasetCounts, Order, OrderItem, Product, Review};
pub use tables::{LOAD_ORDER, TableName};
pub use validation::{IntegrityViolation, validate_dataset};
