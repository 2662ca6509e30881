use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use shopgen_core::catalog::{
    CATEGORIES, EMAIL_DOMAINS, FIRST_NAMES, LAST_NAMES, MAX_ITEMS_PER_ORDER, MAX_QUANTITY,
    MAX_RATING, MIN_ITEMS_PER_ORDER, MIN_QUANTITY, MIN_RATING, ORDER_TOTAL_MAX, ORDER_TOTAL_MIN,
    PRODUCT_PRICE_MAX, PRODUCT_PRICE_MIN, REVIEW_TEXTS, TIER_SUFFIXES, round_currency,
};
use shopgen_core::{Customer, Dataset, DateRange, DayWindow, Order, OrderItem, Product, Review};

use crate::config::GenerateConfig;
use crate::errors::GenerationError;
use crate::model::{GenerateOptions, GenerationReport};
use crate::output::export_dataset;

/// Produces the five entity sets from one seeded random stream.
///
/// Draws are interleaved in entity-creation order, so calling the steps in a
/// different order changes the output even under the same seed. The order
/// used by [`generate_dataset`] is customers, products, orders, order items,
/// reviews.
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    rng: ChaCha8Rng,
    range: DateRange,
    review_attempt_factor: usize,
}

impl DatasetGenerator {
    pub fn new(seed: u64, range: DateRange) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            range,
            review_attempt_factor: GenerateConfig::default().review_attempt_factor,
        }
    }

    pub fn from_config(config: &GenerateConfig) -> Result<Self, GenerationError> {
        config.validate()?;
        Ok(Self::new(config.seed, config.date_range()?)
            .with_review_attempt_factor(config.review_attempt_factor))
    }

    pub fn with_review_attempt_factor(mut self, factor: usize) -> Self {
        self.review_attempt_factor = factor;
        self
    }

    pub fn date_range(&self) -> DateRange {
        self.range
    }

    /// Customers with ids `1..=count`, signing up in `[start, end - 365 days)`.
    ///
    /// Draw order per customer: first name, last name, signup date, email domain.
    pub fn generate_customers(&mut self, count: usize) -> Result<Vec<Customer>, GenerationError> {
        let window = self.range.signup_window()?;
        let mut customers = Vec::with_capacity(count);

        for idx in 0..count {
            let first = *pick(FIRST_NAMES, &mut self.rng, "first names")?;
            let last = *pick(LAST_NAMES, &mut self.rng, "last names")?;
            let signup_date = sample_date(&window, &mut self.rng);
            let domain = *pick(EMAIL_DOMAINS, &mut self.rng, "email domains")?;

            customers.push(Customer {
                customer_id: idx as i64 + 1,
                name: format!("{first} {last}"),
                email: email_address(first, last, domain),
                signup_date,
            });
        }

        debug!(count = customers.len(), "customers generated");
        Ok(customers)
    }

    /// Products with ids `1..=count`, named `<base> <tier>` within a category.
    pub fn generate_products(&mut self, count: usize) -> Result<Vec<Product>, GenerationError> {
        let mut products = Vec::with_capacity(count);

        for idx in 0..count {
            let category = pick(CATEGORIES, &mut self.rng, "categories")?;
            let base = *pick(category.base_names, &mut self.rng, category.name)?;
            let suffix = *pick(TIER_SUFFIXES, &mut self.rng, "tier suffixes")?;
            let price = self.rng.random_range(PRODUCT_PRICE_MIN..=PRODUCT_PRICE_MAX);

            products.push(Product {
                product_id: idx as i64 + 1,
                name: format!("{base} {suffix}"),
                category: category.name.to_string(),
                price: round_currency(price),
            });
        }

        debug!(count = products.len(), "products generated");
        Ok(products)
    }

    /// Orders placed by customers picked with replacement, each strictly after
    /// the customer's signup. Totals are sampled on their own.
    pub fn generate_orders(
        &mut self,
        count: usize,
        customers: &[Customer],
    ) -> Result<Vec<Order>, GenerationError> {
        if count > 0 && customers.is_empty() {
            return Err(GenerationError::InsufficientPool(
                "cannot place orders without customers".to_string(),
            ));
        }

        let mut orders = Vec::with_capacity(count);
        for idx in 0..count {
            let customer = pick(customers, &mut self.rng, "customers")?;
            let window = self.range.order_window(customer.signup_date)?;
            let order_date = sample_date(&window, &mut self.rng);
            let total = self.rng.random_range(ORDER_TOTAL_MIN..=ORDER_TOTAL_MAX);

            orders.push(Order {
                order_id: idx as i64 + 1,
                customer_id: customer.customer_id,
                order_date,
                total_amount: round_currency(total),
            });
        }

        debug!(count = orders.len(), "orders generated");
        Ok(orders)
    }

    /// One to four items per order over distinct products.
    ///
    /// The product set must hold at least four products whenever there are
    /// orders, even if every drawn item count would fit in fewer. Item counts
    /// are never clamped to the product set size.
    pub fn generate_order_items(
        &mut self,
        orders: &[Order],
        products: &[Product],
    ) -> Result<Vec<OrderItem>, GenerationError> {
        if !orders.is_empty() && products.len() < MAX_ITEMS_PER_ORDER {
            return Err(GenerationError::InsufficientPool(format!(
                "orders may hold up to {MAX_ITEMS_PER_ORDER} distinct products but only {} exist",
                products.len()
            )));
        }

        let mut items = Vec::new();
        let mut next_id = 1_i64;

        for order in orders {
            let item_count = self
                .rng
                .random_range(MIN_ITEMS_PER_ORDER..=MAX_ITEMS_PER_ORDER);
            let picks = rand::seq::index::sample(&mut self.rng, products.len(), item_count);

            for product_idx in picks.iter() {
                let product = &products[product_idx];
                let quantity = self.rng.random_range(MIN_QUANTITY..=MAX_QUANTITY);

                items.push(OrderItem {
                    order_item_id: next_id,
                    order_id: order.order_id,
                    product_id: product.product_id,
                    quantity,
                    price: round_currency(product.price * f64::from(quantity)),
                });
                next_id += 1;
            }
        }

        debug!(count = items.len(), orders = orders.len(), "order items generated");
        Ok(items)
    }

    /// Up to `target_count` reviews with unique `(product, customer)` pairs.
    ///
    /// Reviewers are drawn from customers with at least one order; products
    /// from the full product set. Picking stops after `target_count`
    /// successes, after `target_count * review_attempt_factor` attempts, or
    /// once every (reviewer, product) pair has been used.
    pub fn generate_reviews(
        &mut self,
        target_count: usize,
        orders: &[Order],
        customers: &[Customer],
        products: &[Product],
    ) -> Result<Vec<Review>, GenerationError> {
        if target_count == 0 {
            return Ok(Vec::new());
        }

        let ordering: BTreeSet<i64> = orders.iter().map(|order| order.customer_id).collect();
        let reviewers: Vec<&Customer> = customers
            .iter()
            .filter(|customer| ordering.contains(&customer.customer_id))
            .collect();
        if reviewers.is_empty() {
            return Err(GenerationError::InsufficientPool(
                "no customer has placed an order".to_string(),
            ));
        }
        if products.is_empty() {
            return Err(GenerationError::InsufficientPool(
                "cannot review without products".to_string(),
            ));
        }

        let pair_space = reviewers.len().saturating_mul(products.len());
        let max_attempts = target_count.saturating_mul(self.review_attempt_factor);
        let mut used = HashSet::new();
        let mut reviews = Vec::with_capacity(target_count.min(pair_space));
        let mut attempts = 0_usize;

        while reviews.len() < target_count && attempts < max_attempts && used.len() < pair_space {
            attempts += 1;
            let customer = *pick(&reviewers, &mut self.rng, "reviewers")?;
            let product = pick(products, &mut self.rng, "products")?;
            if !used.insert((product.product_id, customer.customer_id)) {
                continue;
            }

            let window = self.range.review_window(customer.signup_date)?;
            let review_date = sample_date(&window, &mut self.rng);
            let rating = self.rng.random_range(MIN_RATING..=MAX_RATING);
            let text = *pick(REVIEW_TEXTS, &mut self.rng, "review texts")?;

            reviews.push(Review {
                review_id: reviews.len() as i64 + 1,
                product_id: product.product_id,
                customer_id: customer.customer_id,
                rating,
                review_text: text.to_string(),
                review_date,
            });
        }

        if reviews.len() < target_count {
            warn!(
                requested = target_count,
                generated = reviews.len(),
                attempts,
                "review attempts exhausted before target"
            );
        }
        debug!(count = reviews.len(), attempts, "reviews generated");
        Ok(reviews)
    }
}

/// Run all five steps for `config` on one random stream.
pub fn generate_dataset(config: &GenerateConfig) -> Result<Dataset, GenerationError> {
    let mut generator = DatasetGenerator::from_config(config)?;

    let customers = generator.generate_customers(config.customers)?;
    let products = generator.generate_products(config.products)?;
    let orders = generator.generate_orders(config.orders, &customers)?;
    let order_items = generator.generate_order_items(&orders, &products)?;
    let reviews = generator.generate_reviews(config.reviews, &orders, &customers, &products)?;

    Ok(Dataset {
        customers,
        products,
        orders,
        order_items,
        reviews,
    })
}

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub out_dir: PathBuf,
    pub dataset: Dataset,
    pub report: GenerationReport,
}

/// Generates a dataset and exports it as CSV with a JSON report.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn run(&self, config: &GenerateConfig) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let run_id = self
            .options
            .run_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let out_dir = self.options.out_dir.clone();
        std::fs::create_dir_all(&out_dir)?;

        info!(
            run_id = %run_id,
            seed = config.seed,
            customers = config.customers,
            products = config.products,
            orders = config.orders,
            reviews = config.reviews,
            "generation started"
        );

        let dataset = generate_dataset(config)?;

        let violations = dataset.validate();
        for violation in &violations {
            warn!(
                table = %violation.table,
                row_id = violation.row_id,
                code = %violation.code,
                message = %violation.message,
                "integrity violation"
            );
        }
        if self.options.strict && !violations.is_empty() {
            return Err(GenerationError::Integrity(violations.len()));
        }

        let mut report = GenerationReport::new(run_id.clone(), config.seed);
        report.counts = dataset.counts();
        report.reviews_requested = config.reviews as u64;
        report.integrity_violations = violations.len() as u64;
        for table in export_dataset(&dataset, &out_dir)? {
            report.record_table(table);
        }
        report.duration_ms = start.elapsed().as_millis() as u64;

        let report_path = out_dir.join("generation_report.json");
        std::fs::write(&report_path, serde_json::to_vec_pretty(&report)?)?;

        info!(
            run_id = %run_id,
            customers = report.counts.customers,
            products = report.counts.products,
            orders = report.counts.orders,
            order_items = report.counts.order_items,
            reviews = report.counts.reviews,
            bytes_written = report.bytes_written,
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult {
            out_dir,
            dataset,
            report,
        })
    }
}

fn pick<'a, T>(
    values: &'a [T],
    rng: &mut ChaCha8Rng,
    pool: &str,
) -> Result<&'a T, GenerationError> {
    values
        .choose(rng)
        .ok_or_else(|| GenerationError::InsufficientPool(format!("{pool} pool is empty")))
}

fn sample_date(window: &DayWindow, rng: &mut ChaCha8Rng) -> NaiveDate {
    window.date_at(rng.random_range(window.offsets()))
}

fn email_address(first: &str, last: &str, domain: &str) -> String {
    format!("{}.{}@{domain}", first.to_lowercase(), last.to_lowercase())
}
