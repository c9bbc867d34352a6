//! # Seed Data
//!
//! Fixture coupons for development and demos.
//!
//! ## Fixtures
//! Amounts in minor units (100 = 1.00).
//!
//! | Code          | Type    | Value | Cap   | Rules                                   |
//! |---------------|---------|-------|-------|-----------------------------------------|
//! | WELCOME100    | FLAT    | 10000 | -     | NEW tier, first order, cart ≥ 50000, once per user |
//! | GOLD50        | PERCENT | 50    | 50000 | GOLD tier, lifetime ≥ 1000000, cart ≥ 100000 |
//! | ELECTRONICS20 | PERCENT | 20    | 100000| electronics, cart ≥ 200000               |
//! | FASHION15     | PERCENT | 15    | 30000 | fashion, cart ≥ 100000                   |
//! | REGULAR200    | FLAT    | 20000 | -     | REGULAR or GOLD, ≥ 3 orders, cart ≥ 150000 |
//! | INDIA25       | PERCENT | 25    | 40000 | country IN, cart ≥ 100000                |
//! | BULK10        | PERCENT | 10    | 50000 | ≥ 5 items, cart ≥ 200000                 |
//!
//! All fixtures share one validity window, so ties between them are
//! decided by code.

use coupon_core::{CouponDefinition, EligibilityRules, Money};

/// First day the fixtures are valid (midnight UTC).
pub const SEED_START_DATE: &str = "2026-01-01";

/// End of the fixture window (midnight UTC, inclusive).
pub const SEED_END_DATE: &str = "2027-12-31";

fn fixture(
    code: &str,
    description: &str,
    discount_type: &str,
    discount_value: f64,
    max_discount_minor: Option<i64>,
    eligibility: EligibilityRules,
) -> CouponDefinition {
    CouponDefinition {
        code: code.to_string(),
        description: description.to_string(),
        discount_type: discount_type.to_string(),
        discount_value,
        max_discount_amount: max_discount_minor.map(Money::from_minor),
        start_date: SEED_START_DATE.to_string(),
        end_date: SEED_END_DATE.to_string(),
        usage_limit_per_user: None,
        eligibility,
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// The fixture definitions, in declaration order.
pub fn definitions() -> Vec<CouponDefinition> {
    let mut welcome = fixture(
        "WELCOME100",
        "Welcome offer for new users - Flat 100 off",
        "FLAT",
        10000.0,
        None,
        EligibilityRules {
            allowed_user_tiers: strings(&["NEW"]),
            first_order_only: true,
            min_cart_value: Some(Money::from_minor(50000)),
            ..Default::default()
        },
    );
    welcome.usage_limit_per_user = Some(1);

    vec![
        welcome,
        fixture(
            "GOLD50",
            "50% off for Gold members",
            "PERCENT",
            50.0,
            Some(50000),
            EligibilityRules {
                allowed_user_tiers: strings(&["GOLD"]),
                min_lifetime_spend: Some(Money::from_minor(1_000_000)),
                min_cart_value: Some(Money::from_minor(100000)),
                ..Default::default()
            },
        ),
        fixture(
            "ELECTRONICS20",
            "20% off on electronics",
            "PERCENT",
            20.0,
            Some(100000),
            EligibilityRules {
                applicable_categories: strings(&["electronics"]),
                min_cart_value: Some(Money::from_minor(200000)),
                ..Default::default()
            },
        ),
        fixture(
            "FASHION15",
            "15% off on fashion items",
            "PERCENT",
            15.0,
            Some(30000),
            EligibilityRules {
                applicable_categories: strings(&["fashion"]),
                min_cart_value: Some(Money::from_minor(100000)),
                ..Default::default()
            },
        ),
        fixture(
            "REGULAR200",
            "Flat 200 off for regular customers",
            "FLAT",
            20000.0,
            None,
            EligibilityRules {
                allowed_user_tiers: strings(&["REGULAR", "GOLD"]),
                min_orders_placed: Some(3),
                min_cart_value: Some(Money::from_minor(150000)),
                ..Default::default()
            },
        ),
        fixture(
            "INDIA25",
            "25% off for Indian customers",
            "PERCENT",
            25.0,
            Some(40000),
            EligibilityRules {
                allowed_countries: strings(&["IN"]),
                min_cart_value: Some(Money::from_minor(100000)),
                ..Default::default()
            },
        ),
        fixture(
            "BULK10",
            "10% off on bulk orders",
            "PERCENT",
            10.0,
            Some(50000),
            EligibilityRules {
                min_items_count: Some(5),
                min_cart_value: Some(Money::from_minor(200000)),
                ..Default::default()
            },
        ),
    ]
}
