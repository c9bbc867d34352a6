//! # Eligibility
//!
//! Conjunctive rules a checkout must satisfy before a coupon applies.
//!
//! ## Evaluation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  check_eligibility(coupon, user, cart)                                  │
//! │                                                                         │
//! │   1. allowedUserTiers      user.userTier ∈ set                          │
//! │   2. minLifetimeSpend      user.lifetimeSpend ≥ threshold               │
//! │   3. minOrdersPlaced       user.ordersPlaced ≥ threshold                │
//! │   4. firstOrderOnly        user.ordersPlaced == 0                       │
//! │   5. allowedCountries      user.country ∈ set                           │
//! │   6. minCartValue          cart value ≥ threshold                       │
//! │   7. applicableCategories  cart ∩ set ≠ ∅                               │
//! │   8. excludedCategories    cart ∩ set = ∅                               │
//! │   9. minItemsCount         Σ quantity ≥ threshold                       │
//! │                                                                         │
//! │   First failing rule wins ──► Ineligible(reason)                        │
//! │   All pass ─────────────────► Eligible                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Absent thresholds and empty sets impose no constraint. The order is
//! part of the contract: it decides which reason a caller sees when
//! several rules fail at once.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coupon::Coupon;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Cart, CartSummary, User};

// =============================================================================
// Eligibility Rules
// =============================================================================

/// Eligibility constraints attached to a coupon. All fields optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct EligibilityRules {
    pub allowed_user_tiers: Vec<String>,
    pub min_lifetime_spend: Option<Money>,
    pub min_orders_placed: Option<u32>,
    pub first_order_only: bool,
    pub allowed_countries: Vec<String>,
    pub min_cart_value: Option<Money>,

    /// Cart must contain at least one of these categories.
    pub applicable_categories: Vec<String>,

    /// Cart must contain none of these categories.
    pub excluded_categories: Vec<String>,

    /// Threshold on Σ quantity, not on distinct lines.
    pub min_items_count: Option<u32>,
}

impl EligibilityRules {
    /// True when no rule is configured.
    pub fn is_unrestricted(&self) -> bool {
        *self == EligibilityRules::default()
    }

    /// Violations in the rule thresholds themselves.
    pub(crate) fn validate(&self) -> Vec<ValidationError> {
        let thresholds = [
            ("eligibility.minLifetimeSpend", self.min_lifetime_spend),
            ("eligibility.minCartValue", self.min_cart_value),
        ];

        thresholds
            .into_iter()
            .filter(|(_, value)| value.is_some_and(|money| money.is_negative()))
            .map(|(field, _)| ValidationError::must_not_be_negative(field))
            .collect()
    }

    /// Runs the rules in order against precomputed cart aggregates.
    pub fn evaluate(&self, user: &User, cart: &CartSummary<'_>) -> Eligibility {
        if !self.allowed_user_tiers.is_empty()
            && !self.allowed_user_tiers.contains(&user.user_tier)
        {
            return Eligibility::Ineligible(IneligibleReason::TierNotAllowed);
        }

        if let Some(min) = self.min_lifetime_spend {
            if user.lifetime_spend < min {
                return Eligibility::Ineligible(IneligibleReason::LifetimeSpendTooLow { min });
            }
        }

        if let Some(min) = self.min_orders_placed {
            if user.orders_placed < min {
                return Eligibility::Ineligible(IneligibleReason::TooFewOrders { min });
            }
        }

        if self.first_order_only && user.orders_placed > 0 {
            return Eligibility::Ineligible(IneligibleReason::NotFirstOrder);
        }

        if !self.allowed_countries.is_empty() && !self.allowed_countries.contains(&user.country) {
            return Eligibility::Ineligible(IneligibleReason::CountryNotAllowed);
        }

        if let Some(min) = self.min_cart_value {
            if cart.value < min {
                return Eligibility::Ineligible(IneligibleReason::CartValueTooLow { min });
            }
        }

        if !self.applicable_categories.is_empty()
            && !self
                .applicable_categories
                .iter()
                .any(|category| cart.categories.contains(category.as_str()))
        {
            return Eligibility::Ineligible(IneligibleReason::NoApplicableCategory {
                categories: self.applicable_categories.clone(),
            });
        }

        if self
            .excluded_categories
            .iter()
            .any(|category| cart.categories.contains(category.as_str()))
        {
            return Eligibility::Ineligible(IneligibleReason::ExcludedCategoryPresent {
                categories: self.excluded_categories.clone(),
            });
        }

        if let Some(min) = self.min_items_count {
            if cart.items_count < u64::from(min) {
                return Eligibility::Ineligible(IneligibleReason::TooFewItems { min });
            }
        }

        Eligibility::Eligible
    }
}

// =============================================================================
// Verdict
// =============================================================================

/// Why a coupon's eligibility rules rejected a checkout.
///
/// `Display` renders the reason string shown to shoppers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IneligibleReason {
    TierNotAllowed,
    LifetimeSpendTooLow { min: Money },
    TooFewOrders { min: u32 },
    NotFirstOrder,
    CountryNotAllowed,
    CartValueTooLow { min: Money },
    NoApplicableCategory { categories: Vec<String> },
    ExcludedCategoryPresent { categories: Vec<String> },
    TooFewItems { min: u32 },
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IneligibleReason::TierNotAllowed => f.write_str("User tier not allowed"),
            IneligibleReason::LifetimeSpendTooLow { min } => {
                write!(f, "Minimum lifetime spend of {min} required")
            }
            IneligibleReason::TooFewOrders { min } => write!(f, "Minimum {min} orders required"),
            IneligibleReason::NotFirstOrder => f.write_str("Valid only for first order"),
            IneligibleReason::CountryNotAllowed => f.write_str("Country not allowed"),
            IneligibleReason::CartValueTooLow { min } => {
                write!(f, "Minimum cart value of {min} required")
            }
            IneligibleReason::NoApplicableCategory { categories } => write!(
                f,
                "No items from applicable categories: {}",
                categories.join(", ")
            ),
            IneligibleReason::ExcludedCategoryPresent { categories } => write!(
                f,
                "Cart contains excluded categories: {}",
                categories.join(", ")
            ),
            IneligibleReason::TooFewItems { min } => {
                write!(f, "Minimum {min} items required in cart")
            }
        }
    }
}

/// Result of running a coupon's rules against one checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    Ineligible(IneligibleReason),
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }

    /// The rejection reason, `None` when eligible.
    pub fn reason(&self) -> Option<&IneligibleReason> {
        match self {
            Eligibility::Eligible => None,
            Eligibility::Ineligible(reason) => Some(reason),
        }
    }
}

/// Checks a coupon's eligibility rules against a user and cart.
///
/// Pure: ignores the validity window and usage counters, which the
/// selection engine checks first.
pub fn check_eligibility(coupon: &Coupon, user: &User, cart: &Cart) -> Eligibility {
    coupon.eligibility.evaluate(user, &cart.summary())
}

// =============================================================================
// Unit Tests
// =============================================================================
