//! # Domain Types
//!
//! Checkout inputs handed to the engine by its caller.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Checkout Inputs                                 │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │      Cart       │   │    CartItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  user_id        │   │  items[] ───────┼──►│  product_id     │       │
//! │  │  user_tier      │   │                 │   │  category       │       │
//! │  │  country        │   └────────┬────────┘   │  unit_price     │       │
//! │  │  lifetime_spend │            │            │  quantity       │       │
//! │  │  orders_placed  │            ▼            └─────────────────┘       │
//! │  └─────────────────┘   ┌─────────────────┐                             │
//! │                        │   CartSummary   │  computed once per          │
//! │  ┌─────────────────┐   │  value          │  evaluation                 │
//! │  │   PercentRate   │   │  items_count    │                             │
//! │  │  bps (u32)      │   │  categories     │                             │
//! │  │  2000 = 20%     │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Percent Rate
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 2000 bps = 20%.
/// Keeps percentage discounts in integer math alongside [`Money`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PercentRate(u32);

impl PercentRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        PercentRate(bps)
    }

    /// Creates a rate from a percentage such as `12.5`.
    ///
    /// Precision beyond two decimal places is rounded away.
    /// Negative input saturates to zero.
    pub fn from_percentage(pct: f64) -> Self {
        PercentRate((pct * 100.0).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// User
// =============================================================================

/// The shopper a checkout is evaluated for.
///
/// `lifetimeSpend` and `ordersPlaced` default to zero when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,

    /// Loyalty tier label, e.g. `NEW`, `REGULAR`, `GOLD`.
    pub user_tier: String,

    /// Country code, e.g. `IN`.
    pub country: String,

    #[serde(default)]
    pub lifetime_spend: Money,

    #[serde(default)]
    pub orders_placed: u32,
}

// =============================================================================
// Cart
// =============================================================================

/// One line of the shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub category: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl CartItem {
    /// Unit price × quantity, saturating.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Unit price × quantity, or `None` on overflow.
    #[inline]
    pub fn checked_line_total(&self) -> Option<Money> {
        self.unit_price.checked_multiply_quantity(self.quantity)
    }
}

/// An ordered sequence of cart lines. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new(items: Vec<CartItem>) -> Self {
        Cart { items }
    }

    /// Σ(unit_price × quantity), saturating at `i64::MAX` minor units.
    ///
    /// Checkout validation rejects carts whose exact total does not fit,
    /// see [`Cart::checked_value`].
    pub fn value(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Σ(unit_price × quantity), or `None` if any step overflows.
    pub fn checked_value(&self) -> Option<Money> {
        self.items.iter().try_fold(Money::zero(), |total, item| {
            total.checked_add(item.checked_line_total()?)
        })
    }

    /// Σ(quantity), i.e. units rather than distinct lines.
    pub fn items_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Distinct categories present in the cart.
    pub fn categories(&self) -> BTreeSet<&str> {
        self.items.iter().map(|item| item.category.as_str()).collect()
    }

    /// Computes every aggregate the eligibility rules need in one pass.
    pub fn summary(&self) -> CartSummary<'_> {
        CartSummary {
            value: self.value(),
            items_count: self.items_count(),
            categories: self.categories(),
        }
    }
}

/// Cart aggregates shared by all rules of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary<'a> {
    pub value: Money,
    pub items_count: u64,
    pub categories: BTreeSet<&'a str>,
}

// =============================================================================
// Unit Tests
// =============================================================================
