//! # Validation Module
//!
//! Checkout input validation: the `User` and `Cart` a caller submits for
//! evaluation. Coupon definitions validate themselves, see
//! [`CouponDefinition::validate`](crate::coupon::CouponDefinition::validate).
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (serde)                                       │
//! │  ├── Shape and types (missing `user`, `cart.items`, ...)               │
//! │  └── Rejected as VALIDATION_ERROR before any handler runs              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Non-empty identifiers                                             │
//! │  ├── Non-negative money, quantity ≥ 1                                  │
//! │  ├── Bounded cart size                                                 │
//! │  └── Cart total fits in Money                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Selection engine                                             │
//! │  └── Assumes well-formed input                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unlike coupon definitions, checkout input fails fast: the first
//! violation is returned.
//!
//! ## Usage
//! ```rust
//! use coupon_core::validation::validate_checkout;
//! use coupon_core::{Cart, Money, User};
//!
//! let user = User {
//!     user_id: "u1".to_string(),
//!     user_tier: "NEW".to_string(),
//!     country: "IN".to_string(),
//!     lifetime_spend: Money::zero(),
//!     orders_placed: 0,
//! };
//!
//! assert!(validate_checkout(&user, &Cart::default()).is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Cart, CartItem, User};
use crate::MAX_CART_ITEMS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Rejects empty or whitespace-only text.
///
/// ```rust
/// use coupon_core::validation::validate_required;
///
/// assert!(validate_required("userId", "u1").is_ok());
/// assert!(validate_required("userId", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }

    Ok(())
}

/// Rejects negative amounts. Zero is allowed (free items, new users).
pub fn validate_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::must_not_be_negative(field));
    }

    Ok(())
}

/// Validates a coupon code taken from a path or request.
///
/// Codes are case-sensitive and kept verbatim; only emptiness is rejected.
pub fn validate_code(code: &str) -> ValidationResult<()> {
    validate_required("code", code)
}

// =============================================================================
// Checkout Validators
// =============================================================================

/// Validates the shopper half of a checkout.
pub fn validate_user(user: &User) -> ValidationResult<()> {
    validate_required("user.userId", &user.user_id)?;
    validate_required("user.userTier", &user.user_tier)?;
    validate_required("user.country", &user.country)?;
    validate_non_negative("user.lifetimeSpend", user.lifetime_spend)?;
    Ok(())
}

/// Validates one cart line. `index` is used in field paths.
pub fn validate_cart_item(index: usize, item: &CartItem) -> ValidationResult<()> {
    validate_required(&format!("cart.items[{index}].productId"), &item.product_id)?;
    validate_required(&format!("cart.items[{index}].category"), &item.category)?;
    validate_non_negative(&format!("cart.items[{index}].unitPrice"), item.unit_price)?;

    if item.quantity == 0 {
        return Err(ValidationError::must_be_positive(format!(
            "cart.items[{index}].quantity"
        )));
    }

    Ok(())
}

/// Validates a cart: size bound, each line in order, then the total.
///
/// An empty cart is valid; it simply fails value-based rules.
pub fn validate_cart(cart: &Cart) -> ValidationResult<()> {
    if cart.items.len() > MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart.items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    cart.items
        .iter()
        .enumerate()
        .try_for_each(|(index, item)| validate_cart_item(index, item))?;

    if cart.checked_value().is_none() {
        return Err(ValidationError::ExceedsMaximum {
            field: "cart.value".to_string(),
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a full evaluation request.
pub fn validate_checkout(user: &User, cart: &Cart) -> ValidationResult<()> {
    validate_user(user)?;
    validate_cart(cart)
}

// =============================================================================
// Unit Tests
// =============================================================================
