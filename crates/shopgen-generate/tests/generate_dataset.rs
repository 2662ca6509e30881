use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;

use shopgen_core::{Customer, DateRange, Order};
use shopgen_generate::{DatasetGenerator, GenerateConfig, GenerationError, generate_dataset};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn signups(customers: &[Customer]) -> HashMap<i64, NaiveDate> {
    customers
        .iter()
        .map(|customer| (customer.customer_id, customer.signup_date))
        .collect()
}

#[test]
fn default_seed_yields_requested_counts() {
    let config = GenerateConfig::default();
    let dataset = generate_dataset(&config).expect("generate dataset");

    assert_eq!(dataset.customers.len(), 30);
    assert_eq!(dataset.products.len(), 35);
    assert_eq!(dataset.orders.len(), 25);
    assert!((25..=100).contains(&dataset.order_items.len()));
    assert!(dataset.reviews.len() <= 30);

    let pairs: HashSet<(i64, i64)> = dataset
        .reviews
        .iter()
        .map(|review| (review.product_id, review.customer_id))
        .collect();
    assert_eq!(pairs.len(), dataset.reviews.len());
}

#[test]
fn generation_is_deterministic() {
    let config = GenerateConfig::default();
    let first = generate_dataset(&config).expect("generate A");
    let second = generate_dataset(&config).expect("generate B");
    assert_eq!(first, second);

    let other = GenerateConfig {
        seed: 7,
        ..GenerateConfig::default()
    };
    let third = generate_dataset(&other).expect("generate C");
    assert_ne!(first, third, "different seeds should diverge");
}

#[test]
fn generated_dataset_passes_integrity_checks() {
    for seed in [1_u64, 42, 1234] {
        let config = GenerateConfig {
            seed,
            customers: 60,
            products: 20,
            orders: 120,
            reviews: 80,
            ..GenerateConfig::default()
        };
        let dataset = generate_dataset(&config).expect("generate dataset");
        let violations = dataset.validate();
        assert!(violations.is_empty(), "seed {seed}: {violations:?}");
    }
}

#[test]
fn orders_and_reviews_follow_signup() {
    let config = GenerateConfig {
        customers: 40,
        orders: 200,
        reviews: 100,
        ..GenerateConfig::default()
    };
    let dataset = generate_dataset(&config).expect("generate dataset");
    let signups = signups(&dataset.customers);

    for order in &dataset.orders {
        let signup = signups[&order.customer_id];
        assert!(order.order_date > signup, "order {} precedes signup", order.order_id);
        assert!(order.order_date <= config.end_date);
    }
    for review in &dataset.reviews {
        let signup = signups[&review.customer_id];
        assert!(review.review_date > signup + chrono::Duration::days(7));
        assert!(review.review_date <= config.end_date);
    }
}

#[test]
fn customer_fields_follow_pools_and_window() {
    let config = GenerateConfig::default();
    let dataset = generate_dataset(&config).expect("generate dataset");
    let latest_signup = config.end_date - chrono::Duration::days(365);

    for (idx, customer) in dataset.customers.iter().enumerate() {
        assert_eq!(customer.customer_id, idx as i64 + 1);
        assert!(customer.signup_date >= config.start_date);
        assert!(customer.signup_date < latest_signup);

        let (first, last) = customer.name.split_once(' ').expect("first and last name");
        let local = format!("{}.{}@", first.to_lowercase(), last.to_lowercase());
        assert!(customer.email.starts_with(&local), "{}", customer.email);
    }
}

#[test]
fn products_use_category_pools_and_price_bounds() {
    let config = GenerateConfig::default();
    let dataset = generate_dataset(&config).expect("generate dataset");

    for product in &dataset.products {
        let category = shopgen_core::catalog::category(&product.category).expect("known category");
        let (base, suffix) = product.name.rsplit_once(' ').expect("base and suffix");
        assert!(category.base_names.contains(&base), "{}", product.name);
        assert!(shopgen_core::catalog::TIER_SUFFIXES.contains(&suffix));
        assert!((9.99..=999.99).contains(&product.price));
        assert_eq!(product.price, (product.price * 100.0).round() / 100.0);
    }
}

#[test]
fn order_items_hold_distinct_products() {
    let config = GenerateConfig {
        orders: 150,
        ..GenerateConfig::default()
    };
    let dataset = generate_dataset(&config).expect("generate dataset");
    let prices: HashMap<i64, f64> = dataset
        .products
        .iter()
        .map(|product| (product.product_id, product.price))
        .collect();

    let mut by_order: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
    for item in &dataset.order_items {
        assert!((1..=5).contains(&item.quantity));
        let expected = (prices[&item.product_id] * f64::from(item.quantity) * 100.0).round() / 100.0;
        assert_eq!(item.price, expected);
        by_order.entry(item.order_id).or_default().push(item.product_id);
    }

    assert_eq!(by_order.len(), dataset.orders.len());
    for products in by_order.values() {
        assert!((1..=4).contains(&products.len()));
        let distinct: HashSet<&i64> = products.iter().collect();
        assert_eq!(distinct.len(), products.len());
    }
}

#[test]
fn totals_are_sampled_independently_of_items() {
    let config = GenerateConfig::default();
    let dataset = generate_dataset(&config).expect("generate dataset");

    let mut item_sums: HashMap<i64, f64> = HashMap::new();
    for item in &dataset.order_items {
        *item_sums.entry(item.order_id).or_insert(0.0) += item.price;
    }
    let mismatched = dataset
        .orders
        .iter()
        .filter(|order| (item_sums[&order.order_id] - order.total_amount).abs() > 0.01)
        .count();
    assert!(mismatched > 0);
    for order in &dataset.orders {
        assert!((20.0..=1500.0).contains(&order.total_amount));
    }
}

#[test]
fn reviews_stop_when_pair_space_is_exhausted() {
    let range = DateRange::default();
    let mut generator = DatasetGenerator::new(3, range);
    let customers = generator.generate_customers(2).expect("customers");
    let products = generator.generate_products(4).expect("products");
    let orders = generator.generate_orders(5, &customers).expect("orders");

    let reviewers: HashSet<i64> = orders.iter().map(|order| order.customer_id).collect();
    let reviews = generator
        .generate_reviews(50, &orders, &customers, &products)
        .expect("reviews");

    assert!(reviews.len() <= reviewers.len() * products.len());
    for review in &reviews {
        assert!(reviewers.contains(&review.customer_id));
    }
}

#[test]
fn unbounded_review_target_yields_every_pair_once() {
    let mut generator = DatasetGenerator::new(11, DateRange::default());
    let customers = generator.generate_customers(1).expect("customers");
    let products = generator.generate_products(4).expect("products");
    let orders = generator.generate_orders(1, &customers).expect("orders");

    let reviews = generator
        .generate_reviews(usize::MAX, &orders, &customers, &products)
        .expect("reviews");

    assert_eq!(reviews.len(), products.len());
    let pairs: HashSet<(i64, i64)> = reviews
        .iter()
        .map(|review| (review.product_id, review.customer_id))
        .collect();
    assert_eq!(pairs.len(), reviews.len());
}

#[test]
fn huge_review_target_in_config_is_capped_by_pair_space() {
    let config = GenerateConfig {
        customers: 1,
        products: 4,
        orders: 1,
        reviews: usize::MAX,
        ..GenerateConfig::default()
    };

    let dataset = generate_dataset(&config).expect("generate");

    assert_eq!(dataset.reviews.len(), 4);
    assert!(dataset.validate().is_empty());
}

#[test]
fn degenerate_range_is_rejected() {
    let config = GenerateConfig {
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
        ..GenerateConfig::default()
    };
    assert!(matches!(
        generate_dataset(&config),
        Err(GenerationError::InvalidRange(_))
    ));
}

#[test]
fn too_few_products_for_order_items_is_rejected() {
    let config = GenerateConfig {
        products: 3,
        ..GenerateConfig::default()
    };
    assert!(matches!(
        generate_dataset(&config),
        Err(GenerationError::InsufficientPool(_))
    ));

    let mut generator = DatasetGenerator::new(1, DateRange::default());
    let order = Order {
        order_id: 1,
        customer_id: 1,
        order_date: date(2023, 5, 1),
        total_amount: 50.0,
    };
    let products = generator.generate_products(2).expect("products");
    assert!(matches!(
        generator.generate_order_items(&[order], &products),
        Err(GenerationError::InsufficientPool(_))
    ));
}

#[test]
fn orders_without_customers_are_rejected() {
    let mut generator = DatasetGenerator::new(1, DateRange::default());
    assert!(matches!(
        generator.generate_orders(3, &[]),
        Err(GenerationError::InsufficientPool(_))
    ));
    assert!(generator.generate_orders(0, &[]).expect("no orders").is_empty());
}

#[test]
fn zero_attempt_factor_is_rejected() {
    let config = GenerateConfig {
        review_attempt_factor: 0,
        ..GenerateConfig::default()
    };
    assert!(matches!(
        generate_dataset(&config),
        Err(GenerationError::InvalidConfig(_))
    ));
}
