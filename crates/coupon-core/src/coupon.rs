//! # Coupon Entity
//!
//! One coupon definition: its validation, validity window, per-user usage
//! counter, and discount math.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CouponDefinition (raw input, e.g. JSON body)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate() ── every check runs, every violation reported              │
//! │       │                                                                 │
//! │       ├── violations? ──► CoreError::InvalidCoupon([...])              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Coupon (typed: DiscountType, parsed dates)                            │
//! │       │                                                                 │
//! │       ├── is_date_valid(now)          read-only                        │
//! │       ├── has_exceeded_usage_limit()  read-only                        │
//! │       ├── calculate_discount()        read-only                        │
//! │       └── increment_usage()           redemption only                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::eligibility::EligibilityRules;
use crate::error::{CoreError, CoreResult, ValidationError, ValidationErrors};
use crate::money::Money;
use crate::types::PercentRate;
use crate::MAX_PERCENT_DISCOUNT;

// =============================================================================
// Discount Type
// =============================================================================

/// How a coupon's `discountValue` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// `discountValue` is an amount in minor units.
    Flat,
    /// `discountValue` is a percentage in (0, 100].
    Percent,
}

impl DiscountType {
    pub const ALL: [DiscountType; 2] = [DiscountType::Flat, DiscountType::Percent];

    pub const fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Flat => "FLAT",
            DiscountType::Percent => "PERCENT",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FLAT" => Ok(DiscountType::Flat),
            "PERCENT" => Ok(DiscountType::Percent),
            _ => Err(ValidationError::NotAllowed {
                field: "discountType".to_string(),
                allowed: DiscountType::ALL
                    .iter()
                    .map(|t| t.as_str().to_string())
                    .collect(),
            }),
        }
    }
}

// =============================================================================
// Coupon Definition
// =============================================================================

/// Raw coupon input as supplied by an operator.
///
/// Every field defaults when absent so that a sparse body still reaches
/// [`CouponDefinition::validate`] and gets a complete list of problems,
/// instead of failing on the first missing key during deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CouponDefinition {
    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub description: String,

    /// `FLAT` or `PERCENT`. Kept as text so unknown values are reported
    /// alongside the other violations.
    #[serde(default)]
    pub discount_type: String,

    /// FLAT: minor units (whole number). PERCENT: percentage in (0, 100].
    #[serde(default)]
    pub discount_value: f64,

    /// Cap on a PERCENT discount. Ignored for FLAT coupons.
    #[serde(default)]
    pub max_discount_amount: Option<Money>,

    /// RFC 3339 timestamp or `YYYY-MM-DD` (midnight UTC).
    #[serde(default)]
    pub start_date: String,

    /// RFC 3339 timestamp or `YYYY-MM-DD` (midnight UTC).
    #[serde(default)]
    pub end_date: String,

    /// Redemptions allowed per user. `None` = unlimited.
    #[serde(default)]
    pub usage_limit_per_user: Option<u32>,

    #[serde(default)]
    pub eligibility: EligibilityRules,
}

/// Outcome of running every definition check once.
struct Inspection {
    errors: Vec<ValidationError>,
    discount_type: Option<DiscountType>,
    window: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl CouponDefinition {
    /// Returns every violation in this definition. Empty means valid.
    ///
    /// ## Checks (all run, none short-circuit)
    /// 1. `code` non-empty
    /// 2. `description` non-empty
    /// 3. `discountType` is FLAT or PERCENT
    /// 4. `discountValue` positive
    /// 5. PERCENT `discountValue` ≤ 100
    /// 6. FLAT `discountValue` is a whole number of minor units; PERCENT
    ///    has at most two decimal places (whole basis points)
    /// 7. `maxDiscountAmount` positive when present
    /// 8. `startDate` / `endDate` parse
    /// 9. `startDate` < `endDate`
    /// 10. eligibility money thresholds not negative
    ///
    /// ```rust
    /// use coupon_core::CouponDefinition;
    ///
    /// let broken = CouponDefinition {
    ///     discount_type: "BOGO".to_string(),
    ///     ..Default::default()
    /// };
    /// assert!(broken.validate().len() >= 5);
    /// ```
    pub fn validate(&self) -> Vec<ValidationError> {
        self.inspect().errors
    }

    fn inspect(&self) -> Inspection {
        let mut errors = Vec::new();

        if self.code.trim().is_empty() {
            errors.push(ValidationError::required("code"));
        }

        if self.description.trim().is_empty() {
            errors.push(ValidationError::required("description"));
        }

        let discount_type = match self.discount_type.parse::<DiscountType>() {
            Ok(discount_type) => Some(discount_type),
            Err(err) => {
                errors.push(err);
                None
            }
        };

        if !(self.discount_value.is_finite() && self.discount_value > 0.0) {
            errors.push(ValidationError::must_be_positive("discountValue"));
        }

        match discount_type {
            Some(DiscountType::Percent) if self.discount_value > MAX_PERCENT_DISCOUNT => {
                errors.push(ValidationError::ExceedsMaximum {
                    field: "discountValue".to_string(),
                    max: MAX_PERCENT_DISCOUNT as i64,
                });
            }
            Some(DiscountType::Flat)
                if self.discount_value.is_finite() && self.discount_value.fract() != 0.0 =>
            {
                errors.push(ValidationError::invalid_format(
                    "discountValue",
                    "FLAT amounts must be a whole number of minor units",
                ));
            }
            Some(DiscountType::Percent)
                if self.discount_value.is_finite()
                    && self.discount_value > 0.0
                    && !is_whole_basis_points(self.discount_value) =>
            {
                errors.push(ValidationError::invalid_format(
                    "discountValue",
                    "PERCENT values allow at most two decimal places",
                ));
            }
            _ => {}
        }

        if let Some(cap) = self.max_discount_amount {
            if !cap.is_positive() {
                errors.push(ValidationError::must_be_positive("maxDiscountAmount"));
            }
        }

        let start = parse_instant(&self.start_date);
        if start.is_none() {
            errors.push(ValidationError::invalid_format(
                "startDate",
                "must be a valid date",
            ));
        }

        let end = parse_instant(&self.end_date);
        if end.is_none() {
            errors.push(ValidationError::invalid_format(
                "endDate",
                "must be a valid date",
            ));
        }

        let window = match (start, end) {
            (Some(start), Some(end)) if start < end => Some((start, end)),
            (Some(_), Some(_)) => {
                errors.push(ValidationError::MustBeAfter {
                    field: "endDate".to_string(),
                    other: "startDate".to_string(),
                });
                None
            }
            _ => None,
        };

        errors.extend(self.eligibility.validate());

        Inspection {
            errors,
            discount_type,
            window,
        }
    }
}

/// True when `pct` converts to basis points without rounding.
fn is_whole_basis_points(pct: f64) -> bool {
    let bps = pct * 100.0;
    (bps - bps.round()).abs() < 1e-6
}

/// Parses an RFC 3339 timestamp, or a bare `YYYY-MM-DD` as midnight UTC.
fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
}

// =============================================================================
// Coupon
// =============================================================================

/// A validated coupon.
///
/// ## Invariants
/// - `code` and `description` are non-empty
/// - `discount_value` > 0, and ≤ 100 for PERCENT
/// - `start_date` < `end_date`
/// - `user_usage` only changes through [`Coupon::increment_usage`]
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub max_discount_amount: Option<Money>,
    #[ts(as = "String")]
    pub start_date: DateTime<Utc>,
    #[ts(as = "String")]
    pub end_date: DateTime<Utc>,
    pub usage_limit_per_user: Option<u32>,
    pub eligibility: EligibilityRules,
    user_usage: HashMap<String, u32>,
}

impl Coupon {
    /// Validates a definition and builds the coupon.
    ///
    /// ## Errors
    /// [`CoreError::InvalidCoupon`] carrying every violation found.
    pub fn new(definition: CouponDefinition) -> CoreResult<Self> {
        let inspection = definition.inspect();

        match (inspection.discount_type, inspection.window) {
            (Some(discount_type), Some((start_date, end_date)))
                if inspection.errors.is_empty() =>
            {
                Ok(Coupon {
                    code: definition.code,
                    description: definition.description,
                    discount_type,
                    discount_value: definition.discount_value,
                    max_discount_amount: definition.max_discount_amount,
                    start_date,
                    end_date,
                    usage_limit_per_user: definition.usage_limit_per_user,
                    eligibility: definition.eligibility,
                    user_usage: HashMap::new(),
                })
            }
            _ => Err(CoreError::InvalidCoupon(ValidationErrors::new(
                inspection.errors,
            ))),
        }
    }

    /// True iff `start_date ≤ now ≤ end_date` (both ends inclusive).
    pub fn is_date_valid(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now <= self.end_date
    }

    /// Recorded redemptions for a user (0 if none).
    pub fn usage_for(&self, user_id: &str) -> u32 {
        self.user_usage.get(user_id).copied().unwrap_or(0)
    }

    /// False when no limit is configured; otherwise usage ≥ limit.
    pub fn has_exceeded_usage_limit(&self, user_id: &str) -> bool {
        match self.usage_limit_per_user {
            None => false,
            Some(limit) => self.usage_for(user_id) >= limit,
        }
    }

    /// Records one redemption and returns the user's new count.
    pub fn increment_usage(&mut self, user_id: &str) -> u32 {
        let count = self.user_usage.entry(user_id.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    pub fn user_usage(&self) -> &HashMap<String, u32> {
        &self.user_usage
    }

    /// The PERCENT rate, `None` for FLAT coupons.
    pub fn percent_rate(&self) -> Option<PercentRate> {
        match self.discount_type {
            DiscountType::Percent => Some(PercentRate::from_percentage(self.discount_value)),
            DiscountType::Flat => None,
        }
    }

    /// Discount this coupon grants on a cart of the given value.
    ///
    /// ## Rules
    /// ```text
    /// FLAT     discountValue                      ─┐
    ///                                               ├─► min(·, cartValue) ─► max(·, 0)
    /// PERCENT  cartValue × pct ─► min(·, maxCap)  ─┘
    /// ```
    ///
    /// ```rust
    /// use coupon_core::{Coupon, CouponDefinition, Money};
    ///
    /// let gold = Coupon::new(CouponDefinition {
    ///     code: "GOLD50".to_string(),
    ///     description: "50% off for Gold members".to_string(),
    ///     discount_type: "PERCENT".to_string(),
    ///     discount_value: 50.0,
    ///     max_discount_amount: Some(Money::from_major_minor(500, 0)),
    ///     start_date: "2026-01-01".to_string(),
    ///     end_date: "2026-12-31".to_string(),
    ///     ..Default::default()
    /// })
    /// .unwrap();
    ///
    /// let cart = Money::from_major_minor(2500, 0);
    /// assert_eq!(gold.calculate_discount(cart), Money::from_major_minor(500, 0));
    /// ```
    pub fn calculate_discount(&self, cart_value: Money) -> Money {
        let discount = match self.discount_type {
            DiscountType::Flat => Money::from_minor(self.discount_value as i64),
            DiscountType::Percent => {
                let raw = cart_value.percentage(PercentRate::from_percentage(self.discount_value));
                match self.max_discount_amount {
                    Some(cap) => raw.min(cap),
                    None => raw,
                }
            }
        };

        discount.min(cart_value).max(Money::zero())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(code: &str, discount_type: &str, discount_value: f64) -> CouponDefinition {
        CouponDefinition {
            code: code.to_string(),
            description: format!("{code} test coupon"),
            discount_type: discount_type.to_string(),
            discount_value,
            start_date: "2026-01-01".to_string(),
            end_date: "2026-12-31".to_string(),
            ..Default::default()
        }
    }

    fn at(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_valid_definition_builds_coupon() {
        let coupon = Coupon::new(definition("TEST100", "FLAT", 10000.0)).unwrap();
        assert_eq!(coupon.code, "TEST100");
        assert_eq!(coupon.discount_type, DiscountType::Flat);
        assert_eq!(coupon.start_date, at("2026-01-01T00:00:00Z"));
        assert!(coupon.user_usage().is_empty());
    }

    #[test]
    fn test_validate_reports_every_violation() {
        let broken = CouponDefinition {
            code: String::new(),
            description: "Test".to_string(),
            discount_type: "INVALID".to_string(),
            discount_value: -10.0,
            start_date: "2026-12-31".to_string(),
            end_date: "2026-01-01".to_string(),
            ..Default::default()
        };

        let messages: Vec<String> = broken.validate().iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                "code is required",
                "discountType must be one of: FLAT, PERCENT",
                "discountValue must be positive",
                "endDate must be after startDate",
            ]
        );
    }

    #[test]
    fn test_validate_percent_over_hundred() {
        let errors = definition("P150", "PERCENT", 150.0).validate();
        assert_eq!(
            errors,
            vec![ValidationError::ExceedsMaximum {
                field: "discountValue".to_string(),
                max: 100,
            }]
        );
        assert!(definition("P100", "PERCENT", 100.0).validate().is_empty());
    }

    #[test]
    fn test_validate_fractional_flat_amount() {
        let errors = definition("HALF", "FLAT", 99.5).validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().starts_with("discountValue has invalid format"));

        // Fractional percentages are fine.
        assert!(definition("PCT", "PERCENT", 12.5).validate().is_empty());
    }

    #[test]
    fn test_validate_percent_below_one_basis_point() {
        let errors = definition("TINY", "PERCENT", 0.004).validate();
        assert_eq!(
            errors,
            vec![ValidationError::invalid_format(
                "discountValue",
                "PERCENT values allow at most two decimal places",
            )]
        );
        assert!(Coupon::new(definition("TINY", "PERCENT", 0.004)).is_err());

        assert_eq!(definition("THIRD", "PERCENT", 33.333).validate().len(), 1);
        assert!(definition("THIRD", "PERCENT", 33.33).validate().is_empty());
        assert!(definition("BP", "PERCENT", 0.01).validate().is_empty());
    }

    #[test]
    fn test_validate_unparseable_and_missing_dates() {
        let mut def = definition("DATES", "FLAT", 100.0);
        def.start_date = "not-a-date".to_string();
        def.end_date = String::new();

        let messages: Vec<String> = def.validate().iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                "startDate has invalid format: must be a valid date",
                "endDate has invalid format: must be a valid date",
            ]
        );
    }

    #[test]
    fn test_validate_equal_dates_rejected() {
        let mut def = definition("SAME", "FLAT", 100.0);
        def.end_date = def.start_date.clone();
        assert_eq!(def.validate().len(), 1);
    }

    #[test]
    fn test_validate_non_positive_cap() {
        let mut def = definition("CAP", "PERCENT", 10.0);
        def.max_discount_amount = Some(Money::zero());
        assert_eq!(
            def.validate(),
            vec![ValidationError::must_be_positive("maxDiscountAmount")]
        );
    }

    #[test]
    fn test_rfc3339_dates_accepted() {
        let mut def = definition("TS", "FLAT", 100.0);
        def.start_date = "2026-03-01T10:00:00+05:30".to_string();
        def.end_date = "2026-03-02T10:00:00Z".to_string();
        let coupon = Coupon::new(def).unwrap();
        assert_eq!(coupon.start_date, at("2026-03-01T04:30:00Z"));
    }

    #[test]
    fn test_new_rejects_with_aggregated_error() {
        let err = Coupon::new(CouponDefinition::default()).unwrap_err();
        match err {
            CoreError::InvalidCoupon(errors) => assert!(errors.len() >= 5),
            other => panic!("expected InvalidCoupon, got {other:?}"),
        }
    }

    #[test]
    fn test_is_date_valid_inclusive_bounds() {
        let mut def = definition("WINDOW", "FLAT", 100.0);
        def.start_date = "2026-01-01T00:00:00Z".to_string();
        def.end_date = "2026-01-31T00:00:00Z".to_string();
        let coupon = Coupon::new(def).unwrap();

        assert!(coupon.is_date_valid(at("2026-01-01T00:00:00Z")));
        assert!(coupon.is_date_valid(at("2026-01-15T12:00:00Z")));
        assert!(coupon.is_date_valid(at("2026-01-31T00:00:00Z")));
        assert!(!coupon.is_date_valid(at("2025-12-31T23:59:59Z")));
        assert!(!coupon.is_date_valid(at("2026-01-31T00:00:01Z")));
    }

    #[test]
    fn test_usage_limit() {
        let mut unlimited = Coupon::new(definition("FREE", "FLAT", 100.0)).unwrap();
        unlimited.increment_usage("u1");
        unlimited.increment_usage("u1");
        assert!(!unlimited.has_exceeded_usage_limit("u1"));

        let mut def = definition("ONCE", "FLAT", 100.0);
        def.usage_limit_per_user = Some(1);
        let mut once = Coupon::new(def).unwrap();

        assert!(!once.has_exceeded_usage_limit("u1"));
        assert_eq!(once.increment_usage("u1"), 1);
        assert!(once.has_exceeded_usage_limit("u1"));
        assert!(!once.has_exceeded_usage_limit("u2"));
        assert_eq!(once.usage_for("u2"), 0);
    }

    #[test]
    fn test_zero_usage_limit_is_always_exceeded() {
        let mut def = definition("NEVER", "FLAT", 100.0);
        def.usage_limit_per_user = Some(0);
        let coupon = Coupon::new(def).unwrap();
        assert!(coupon.has_exceeded_usage_limit("anyone"));
    }

    #[test]
    fn test_flat_discount() {
        let coupon = Coupon::new(definition("FLAT100", "FLAT", 10000.0)).unwrap();
        assert_eq!(
            coupon.calculate_discount(Money::from_minor(50000)),
            Money::from_minor(10000)
        );
    }

    #[test]
    fn test_flat_discount_capped_at_cart_value() {
        let coupon = Coupon::new(definition("FLAT100", "FLAT", 10000.0)).unwrap();
        assert_eq!(
            coupon.calculate_discount(Money::from_minor(4000)),
            Money::from_minor(4000)
        );
        assert_eq!(coupon.calculate_discount(Money::zero()), Money::zero());
    }

    #[test]
    fn test_percent_discount() {
        let coupon = Coupon::new(definition("PERCENT20", "PERCENT", 20.0)).unwrap();
        assert_eq!(
            coupon.calculate_discount(Money::from_minor(100000)),
            Money::from_minor(20000)
        );
    }

    #[test]
    fn test_percent_discount_capped_by_max() {
        let mut def = definition("PERCENT50", "PERCENT", 50.0);
        def.max_discount_amount = Some(Money::from_minor(10000));
        let coupon = Coupon::new(def).unwrap();
        assert_eq!(
            coupon.calculate_discount(Money::from_minor(100000)),
            Money::from_minor(10000)
        );
    }

    #[test]
    fn test_cap_is_ignored_for_flat() {
        let mut def = definition("FLATCAP", "FLAT", 20000.0);
        def.max_discount_amount = Some(Money::from_minor(5000));
        let coupon = Coupon::new(def).unwrap();
        assert_eq!(
            coupon.calculate_discount(Money::from_minor(100000)),
            Money::from_minor(20000)
        );
    }

    #[test]
    fn test_discount_bounds_hold_for_any_cart_value() {
        let mut capped = definition("CAPPED", "PERCENT", 100.0);
        capped.max_discount_amount = Some(Money::from_minor(7500));
        let coupons = [
            Coupon::new(definition("F", "FLAT", 25000.0)).unwrap(),
            Coupon::new(definition("P", "PERCENT", 37.5)).unwrap(),
            Coupon::new(capped).unwrap(),
        ];

        for minor in [0, 1, 99, 7500, 24999, 25000, 100_000, 9_999_999] {
            let cart = Money::from_minor(minor);
            for coupon in &coupons {
                let discount = coupon.calculate_discount(cart);
                assert!(discount >= Money::zero(), "{} on {cart}", coupon.code);
                assert!(discount <= cart, "{} on {cart}", coupon.code);
                if let Some(cap) = coupon.max_discount_amount {
                    if coupon.discount_type == DiscountType::Percent {
                        assert!(discount <= cap);
                    }
                }
            }
        }
    }

    #[test]
    fn test_serializes_like_the_public_api() {
        let coupon = Coupon::new(definition("WIRE", "PERCENT", 10.0)).unwrap();
        let json = serde_json::to_value(&coupon).unwrap();
        assert_eq!(json["discountType"], "PERCENT");
        assert_eq!(json["startDate"], "2026-01-01T00:00:00Z");
        assert!(json["maxDiscountAmount"].is_null());
        assert!(json["userUsage"].is_object());
    }

    #[test]
    fn test_definition_deserializes_sparse_body() {
        let def: CouponDefinition =
            serde_json::from_str(r#"{"code":"X","discountType":"FLAT"}"#).unwrap();
        assert_eq!(def.code, "X");
        assert!(!def.validate().is_empty());
    }
}
