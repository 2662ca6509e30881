use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shopgen_core::DateRange;
use shopgen_core::catalog::MAX_ITEMS_PER_ORDER;

use crate::errors::GenerationError;

/// Parameters of one generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Seed for the shared random stream.
    pub seed: u64,
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
    /// Upper bound on generated reviews.
    pub reviews: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Review picks allowed per requested review before giving up.
    pub review_attempt_factor: usize,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        let range = DateRange::default();
        Self {
            seed: 42,
            customers: 30,
            products: 35,
            orders: 25,
            reviews: 30,
            start_date: range.start,
            end_date: range.end,
            review_attempt_factor: 10,
        }
    }
}

impl GenerateConfig {
    pub fn date_range(&self) -> Result<DateRange, GenerationError> {
        Ok(DateRange::new(self.start_date, self.end_date)?)
    }

    /// Reject configurations that cannot produce a consistent dataset.
    pub fn validate(&self) -> Result<(), GenerationError> {
        self.date_range()?;

        if self.review_attempt_factor == 0 {
            return Err(GenerationError::InvalidConfig(
                "review_attempt_factor must be at least 1".to_string(),
            ));
        }
        if self.orders > 0 && self.customers == 0 {
            return Err(GenerationError::InsufficientPool(
                "orders require at least one customer".to_string(),
            ));
        }
        if self.orders > 0 && self.products < MAX_ITEMS_PER_ORDER {
            return Err(GenerationError::InsufficientPool(format!(
                "orders may hold up to {MAX_ITEMS_PER_ORDER} distinct products but only {} exist",
                self.products
            )));
        }
        if self.reviews > 0 && (self.orders == 0 || self.products == 0) {
            return Err(GenerationError::InsufficientPool(
                "reviews require at least one order and one product".to_string(),
            ));
        }

        Ok(())
    }
}
