//! Checkout scenarios against the seeded catalog.

use chrono::{DateTime, Utc};
use coupon_catalog::{CatalogError, CouponCatalog};
use coupon_core::{Cart, CartItem, Money, User};

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-10-19T09:30:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn user(user_id: &str, tier: &str, country: &str, lifetime_spend: i64, orders: u32) -> User {
    User {
        user_id: user_id.to_string(),
        user_tier: tier.to_string(),
        country: country.to_string(),
        lifetime_spend: Money::from_minor(lifetime_spend),
        orders_placed: orders,
    }
}

fn cart(lines: &[(&str, i64, u32)]) -> Cart {
    Cart::new(
        lines
            .iter()
            .enumerate()
            .map(|(i, (category, unit_price, quantity))| CartItem {
                product_id: format!("p{}", i + 1),
                category: category.to_string(),
                unit_price: Money::from_minor(*unit_price),
                quantity: *quantity,
            })
            .collect(),
    )
}

#[test]
fn new_user_first_order_gets_welcome_offer() {
    let catalog = CouponCatalog::seeded().unwrap();
    let shopper = user("u1", "NEW", "IN", 0, 0);
    let basket = cart(&[("electronics", 60000, 1)]);

    let best = catalog.find_best_coupon_at(&shopper, &basket, now()).unwrap();

    assert_eq!(best.coupon.code, "WELCOME100");
    assert_eq!(best.discount_amount, Money::from_minor(10000));
    assert_eq!(best.original_price, Money::from_minor(60000));
    assert_eq!(best.final_price, Money::from_minor(50000));
}

#[test]
fn gold_member_gets_capped_gold_discount() {
    let catalog = CouponCatalog::seeded().unwrap();
    let shopper = user("u2", "GOLD", "IN", 1_500_000, 10);
    let basket = cart(&[("electronics", 200000, 1)]);

    let best = catalog.find_best_coupon_at(&shopper, &basket, now()).unwrap();

    // GOLD50: 50% of 2000.00 = 1000.00, capped at 500.00
    assert_eq!(best.coupon.code, "GOLD50");
    assert_eq!(best.discount_amount, Money::from_minor(50000));
    assert_eq!(best.final_price, Money::from_minor(150000));
}

#[test]
fn equal_discounts_with_equal_end_dates_go_to_smaller_code() {
    let catalog = CouponCatalog::seeded().unwrap();
    let shopper = user("u2", "GOLD", "IN", 1_500_000, 10);
    let basket = cart(&[("electronics", 250000, 1)]);

    let verdicts = catalog.applicable_coupons_at(&shopper, &basket, now());
    let discount_of = |code: &str| {
        verdicts
            .iter()
            .find(|v| v.code == code)
            .and_then(|v| v.discount_amount)
    };
    assert_eq!(discount_of("GOLD50"), Some(Money::from_minor(50000)));
    assert_eq!(discount_of("ELECTRONICS20"), Some(Money::from_minor(50000)));

    let best = catalog.find_best_coupon_at(&shopper, &basket, now()).unwrap();
    assert_eq!(best.coupon.code, "ELECTRONICS20");
}

#[test]
fn gold_member_mixed_cart_tie_goes_to_electronics() {
    let catalog = CouponCatalog::seeded().unwrap();
    let shopper = user("u2", "GOLD", "IN", 1_500_000, 10);
    let basket = cart(&[("electronics", 200000, 1), ("fashion", 50000, 1)]);

    let verdicts = catalog.applicable_coupons_at(&shopper, &basket, now());
    let discount_of = |code: &str| {
        verdicts
            .iter()
            .find(|v| v.code == code)
            .and_then(|v| v.discount_amount)
    };

    // 50% of 2500.00 capped at 500.00, and 20% of 2500.00 under its 1000.00 cap
    assert_eq!(discount_of("GOLD50"), Some(Money::from_minor(50000)));
    assert_eq!(discount_of("ELECTRONICS20"), Some(Money::from_minor(50000)));
    // 15% of 2500.00 = 375.00, capped at 300.00
    assert_eq!(discount_of("FASHION15"), Some(Money::from_minor(30000)));
    assert_eq!(discount_of("INDIA25"), Some(Money::from_minor(40000)));
    assert_eq!(discount_of("REGULAR200"), Some(Money::from_minor(20000)));
    assert_eq!(discount_of("WELCOME100"), None);
    assert_eq!(discount_of("BULK10"), None);

    let best = catalog.find_best_coupon_at(&shopper, &basket, now()).unwrap();
    assert_eq!(best.coupon.code, "ELECTRONICS20");
    assert_eq!(best.original_price, Money::from_minor(250000));
    assert_eq!(best.final_price, Money::from_minor(200000));
}

#[test]
fn no_coupon_matches_books_cart_from_us() {
    let catalog = CouponCatalog::seeded().unwrap();
    let shopper = user("u3", "NEW", "US", 0, 0);
    let basket = cart(&[("books", 10000, 1)]);

    assert!(catalog.find_best_coupon_at(&shopper, &basket, now()).is_none());

    let verdicts = catalog.applicable_coupons_at(&shopper, &basket, now());
    assert_eq!(verdicts.len(), 7);
    assert!(verdicts.iter().all(|v| !v.applicable && v.reason.is_some()));
}

#[test]
fn redeemed_welcome_offer_is_no_longer_offered() {
    let mut catalog = CouponCatalog::seeded().unwrap();
    let shopper = user("u1", "NEW", "IN", 0, 0);
    let basket = cart(&[("electronics", 60000, 1)]);

    assert_eq!(catalog.redeem("WELCOME100", "u1", now()).unwrap(), 1);

    assert!(catalog.find_best_coupon_at(&shopper, &basket, now()).is_none());

    let welcome = catalog
        .applicable_coupons_at(&shopper, &basket, now())
        .into_iter()
        .find(|v| v.code == "WELCOME100")
        .unwrap();
    assert!(!welcome.applicable);
    assert_eq!(welcome.reason.as_deref(), Some("Usage limit exceeded"));
    assert_eq!(welcome.discount_amount, None);

    assert!(matches!(
        catalog.redeem("WELCOME100", "u1", now()),
        Err(CatalogError::UsageLimitExceeded { .. })
    ));
}

#[test]
fn verdict_reasons_follow_rule_order() {
    let catalog = CouponCatalog::seeded().unwrap();
    let shopper = user("u4", "REGULAR", "IN", 200_000, 1);
    let basket = cart(&[("fashion", 30000, 2)]);

    let reasons: Vec<(String, Option<String>)> = catalog
        .applicable_coupons_at(&shopper, &basket, now())
        .into_iter()
        .map(|v| (v.code, v.reason))
        .collect();

    let reason_for = |code: &str| {
        reasons
            .iter()
            .find(|(c, _)| c == code)
            .and_then(|(_, r)| r.clone())
    };

    assert_eq!(reason_for("WELCOME100").as_deref(), Some("User tier not allowed"));
    assert_eq!(reason_for("GOLD50").as_deref(), Some("User tier not allowed"));
    assert_eq!(
        reason_for("REGULAR200").as_deref(),
        Some("Minimum 3 orders required")
    );
    assert_eq!(
        reason_for("ELECTRONICS20").as_deref(),
        Some("Minimum cart value of 2000.00 required")
    );
    assert_eq!(
        reason_for("BULK10").as_deref(),
        Some("Minimum cart value of 2000.00 required")
    );
    // 600.00 of fashion passes neither minimum
    assert_eq!(
        reason_for("FASHION15").as_deref(),
        Some("Minimum cart value of 1000.00 required")
    );
    assert_eq!(
        reason_for("INDIA25").as_deref(),
        Some("Minimum cart value of 1000.00 required")
    );
}

#[test]
fn bulk_cart_needs_five_units() {
    let catalog = CouponCatalog::seeded().unwrap();
    let shopper = user("u5", "NEW", "US", 0, 2);

    let four = cart(&[("grocery", 60000, 4)]);
    let verdicts = catalog.applicable_coupons_at(&shopper, &four, now());
    let bulk = verdicts.iter().find(|v| v.code == "BULK10").unwrap();
    assert_eq!(bulk.reason.as_deref(), Some("Minimum 5 items required in cart"));

    let five = cart(&[("grocery", 60000, 3), ("grocery", 60000, 2)]);
    let best = catalog.find_best_coupon_at(&shopper, &five, now()).unwrap();
    assert_eq!(best.coupon.code, "BULK10");
    // 10% of 3000.00 = 300.00, under the 500.00 cap
    assert_eq!(best.discount_amount, Money::from_minor(30000));
}

#[test]
fn nothing_applies_outside_the_fixture_window() {
    let catalog = CouponCatalog::seeded().unwrap();
    let shopper = user("u1", "NEW", "IN", 0, 0);
    let basket = cart(&[("electronics", 60000, 1)]);
    let later = DateTime::parse_from_rfc3339("2028-01-01T00:00:01Z")
        .unwrap()
        .with_timezone(&Utc);

    assert!(catalog.find_best_coupon_at(&shopper, &basket, later).is_none());
    assert!(catalog
        .applicable_coupons_at(&shopper, &basket, later)
        .iter()
        .all(|v| v.reason.as_deref() == Some("Coupon not valid at this time")));
}

#[test]
fn best_coupon_serializes_with_camel_case_fields() {
    let catalog = CouponCatalog::seeded().unwrap();
    let shopper = user("u1", "NEW", "IN", 0, 0);
    let basket = cart(&[("electronics", 60000, 1)]);

    let best = catalog.find_best_coupon_at(&shopper, &basket, now()).unwrap();
    let json = serde_json::to_value(&best).unwrap();

    assert_eq!(json["coupon"]["code"], "WELCOME100");
    assert_eq!(json["coupon"]["usageLimitPerUser"], 1);
    assert_eq!(json["discountAmount"], 10000);
    assert_eq!(json["originalPrice"], 60000);
    assert_eq!(json["finalPrice"], 50000);
}
