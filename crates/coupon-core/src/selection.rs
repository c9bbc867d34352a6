//! # Selection
//!
//! Picks the single best coupon for a checkout and explains, per coupon,
//! why it does or does not apply.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each coupon:                                                       │
//! │                                                                         │
//! │   is_date_valid(now)? ──no──► SkipReason::NotActive                     │
//! │          │                                                              │
//! │   usage limit reached? ─yes─► SkipReason::UsageLimitExceeded            │
//! │          │                                                              │
//! │   eligibility rules? ──fail─► SkipReason::Ineligible(reason)            │
//! │          │                                                              │
//! │   calculate_discount(cart value)                                        │
//! │                                                                         │
//! │  Ranking of applicable coupons:                                         │
//! │   1. discount      descending                                           │
//! │   2. end_date      ascending   (use the one that expires first)         │
//! │   3. code          ascending   (byte order)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Evaluation never touches usage counters.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::coupon::Coupon;
use crate::eligibility::{Eligibility, IneligibleReason};
use crate::money::Money;
use crate::types::{Cart, CartSummary, User};

// =============================================================================
// Results
// =============================================================================

/// Why a coupon was left out of a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `now` is outside the coupon's validity window.
    NotActive,
    /// The user already redeemed it as often as allowed.
    UsageLimitExceeded,
    /// One of the coupon's eligibility rules failed.
    Ineligible(IneligibleReason),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotActive => f.write_str("Coupon not valid at this time"),
            SkipReason::UsageLimitExceeded => f.write_str("Usage limit exceeded"),
            SkipReason::Ineligible(reason) => write!(f, "{reason}"),
        }
    }
}

/// The winning coupon for a checkout.
///
/// `final_price = original_price - discount_amount`, never negative.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BestCoupon {
    pub coupon: Coupon,
    pub discount_amount: Money,
    pub original_price: Money,
    pub final_price: Money,
}

/// One coupon's outcome for a checkout.
///
/// Exactly one of `reason` / `discount_amount` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CouponVerdict {
    pub code: String,
    pub description: String,
    pub applicable: bool,
    pub reason: Option<String>,
    pub discount_amount: Option<Money>,
}

// =============================================================================
// Evaluation
// =============================================================================

/// Runs the skip checks in order; `Ok` carries the discount.
fn evaluate(
    coupon: &Coupon,
    user: &User,
    cart: &CartSummary<'_>,
    now: DateTime<Utc>,
) -> Result<Money, SkipReason> {
    if !coupon.is_date_valid(now) {
        return Err(SkipReason::NotActive);
    }

    if coupon.has_exceeded_usage_limit(&user.user_id) {
        return Err(SkipReason::UsageLimitExceeded);
    }

    match coupon.eligibility.evaluate(user, cart) {
        Eligibility::Eligible => Ok(coupon.calculate_discount(cart.value)),
        Eligibility::Ineligible(reason) => Err(SkipReason::Ineligible(reason)),
    }
}

/// Ordering of two applicable candidates; `Less` ranks first.
fn rank(a: (&Coupon, Money), b: (&Coupon, Money)) -> Ordering {
    b.1.cmp(&a.1)
        .then_with(|| a.0.end_date.cmp(&b.0.end_date))
        .then_with(|| a.0.code.cmp(&b.0.code))
}

/// Selects the applicable coupon with the largest discount.
///
/// Ties go to the coupon expiring first, then to the lexicographically
/// smaller code. Returns `None` when nothing applies, including for an
/// empty catalog.
pub fn find_best_coupon<'a, I>(
    coupons: I,
    user: &User,
    cart: &Cart,
    now: DateTime<Utc>,
) -> Option<BestCoupon>
where
    I: IntoIterator<Item = &'a Coupon>,
{
    let summary = cart.summary();
    let cart_value = summary.value;

    let best = coupons
        .into_iter()
        .filter_map(|coupon| match evaluate(coupon, user, &summary, now) {
            Ok(discount) => Some((coupon, discount)),
            Err(reason) => {
                debug!(code = %coupon.code, user_id = %user.user_id, %reason, "Coupon skipped");
                None
            }
        })
        .min_by(|a, b| rank(*a, *b))?;

    let (coupon, discount_amount) = best;
    debug!(
        code = %coupon.code,
        user_id = %user.user_id,
        discount = %discount_amount,
        "Best coupon selected"
    );

    Some(BestCoupon {
        coupon: coupon.clone(),
        discount_amount,
        original_price: cart_value,
        final_price: cart_value - discount_amount,
    })
}

/// One verdict per coupon, in iteration order, none filtered out.
pub fn applicable_coupons<'a, I>(
    coupons: I,
    user: &User,
    cart: &Cart,
    now: DateTime<Utc>,
) -> Vec<CouponVerdict>
where
    I: IntoIterator<Item = &'a Coupon>,
{
    let summary = cart.summary();

    coupons
        .into_iter()
        .map(|coupon| {
            let outcome = evaluate(coupon, user, &summary, now);
            CouponVerdict {
                code: coupon.code.clone(),
                description: coupon.description.clone(),
                applicable: outcome.is_ok(),
                reason: outcome.as_ref().err().map(ToString::to_string),
                discount_amount: outcome.ok(),
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
