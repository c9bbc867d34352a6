//! # coupon-core: Pure Coupon Evaluation Logic
//!
//! This crate is the **heart** of the coupon engine. It decides which
//! coupons apply to a checkout and which one saves the customer the most,
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Coupon Engine Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Checkout Front-end                           │   │
//! │  │      Cart UI ──► "Best coupon" ──► Applicable coupon list       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    coupon-api (axum)                            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    coupon-catalog                               │   │
//! │  │          code → Coupon map, seed data, redemption               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ coupon-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌─────────────┐ ┌─────────────┐   │   │
//! │  │   │  money   │ │  coupon  │ │ eligibility │ │  selection  │   │   │
//! │  │   │  Money   │ │  Coupon  │ │   Rules     │ │ BestCoupon  │   │   │
//! │  │   │ Percent  │ │ validate │ │   Reasons   │ │  Verdicts   │   │   │
//! │  │   └──────────┘ └──────────┘ └─────────────┘ └─────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO GLOBAL STATE • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Checkout inputs (User, Cart, CartItem) and `PercentRate`
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`coupon`] - The Coupon entity: validation, validity window, discount math
//! - [`eligibility`] - Conjunctive eligibility rules and rejection reasons
//! - [`selection`] - Best-coupon selection and per-coupon verdicts
//! - [`validation`] - Checkout input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use coupon_core::money::Money;
//! use coupon_core::types::PercentRate;
//!
//! let cart_value = Money::from_major_minor(2500, 0);
//! let twenty_percent = PercentRate::from_percentage(20.0);
//!
//! assert_eq!(cart_value.percentage(twenty_percent), Money::from_major_minor(500, 0));
//! ```

pub mod coupon;
pub mod eligibility;
pub mod error;
pub mod money;
pub mod selection;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use coupon::{Coupon, CouponDefinition, DiscountType};
pub use eligibility::{check_eligibility, Eligibility, EligibilityRules, IneligibleReason};
pub use error::{CoreError, CoreResult, ValidationError, ValidationErrors};
pub use money::Money;
pub use selection::{
    applicable_coupons, find_best_coupon, BestCoupon, CouponVerdict, SkipReason,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Upper bound for a PERCENT coupon's `discountValue`.
pub const MAX_PERCENT_DISCOUNT: f64 = 100.0;

/// Maximum line items accepted in a single evaluation request.
///
/// Evaluation is O(coupons × items); this keeps a single request bounded.
pub const MAX_CART_ITEMS: usize = 500;
