//! # Money Module
//!
//! Provides the `Money` type used for every monetary amount the engine
//! touches: item prices, cart totals, thresholds, discounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │    15% of 999.99 = 149.9985  → which paisa does the customer get?       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    99999 minor × 1500 bps = 149.9985 → rounds to 15000 minor           │
//! │    The rounding happens once, in one place, with one rule              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use coupon_core::money::Money;
//!
//! let price = Money::from_minor(59900); // 599.00
//! let line = price * 2;                 // 1198.00
//! let total = line + Money::from_major_minor(50, 0);
//!
//! assert_eq!(total.minor(), 124800);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::PercentRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (paise, cents, ...).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences such as `cart - discount` stay representable
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized as a bare integer**: `{"unitPrice": 60000}` is 600.00
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CartItem.unit_price × quantity ──► Cart value ──┬──► eligibility       │
/// │                                                   │    (minCartValue)   │
/// │                                                   │                     │
/// │                                                   └──► calculate_discount
/// │                                                         │               │
/// │                                      discountAmount ◄───┘               │
/// │                                      finalPrice = cart value - discount │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ```rust
    /// use coupon_core::money::Money;
    ///
    /// let price = Money::from_minor(1099); // 10.99
    /// assert_eq!(price.minor(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    ///
    /// ```rust
    /// use coupon_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(10, 99).minor(), 1099);
    /// assert_eq!(Money::from_major_minor(-5, 50).minor(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Takes a percentage of this amount.
    ///
    /// ## Implementation
    /// Integer math in basis points: `(amount * bps + 5000) / 10000`.
    /// The +5000 rounds half away from zero for positive amounts.
    ///
    /// ```rust
    /// use coupon_core::money::Money;
    /// use coupon_core::types::PercentRate;
    ///
    /// let cart = Money::from_minor(99999);          // 999.99
    /// let rate = PercentRate::from_percentage(15.0);
    ///
    /// // 999.99 × 15% = 149.9985 → 150.00
    /// assert_eq!(cart.percentage(rate).minor(), 15000);
    /// ```
    pub fn percentage(&self, rate: PercentRate) -> Money {
        // i128 so large carts cannot overflow the intermediate product
        let minor = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_minor(minor as i64)
    }

    /// Multiplies a unit price by a quantity, saturating at the i64 bounds.
    ///
    /// ```rust
    /// use coupon_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(299);
    /// assert_eq!(unit_price.multiply_quantity(3).minor(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Multiplies by a quantity, or `None` if the product overflows.
    ///
    /// ```rust
    /// use coupon_core::money::Money;
    ///
    /// assert!(Money::from_minor(i64::MAX / 2).checked_multiply_quantity(3).is_none());
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: u32) -> Option<Self> {
        match self.0.checked_mul(qty as i64) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }

    /// Adds two amounts, or `None` if the sum overflows.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
//
// The operators saturate instead of wrapping; callers that must detect
// overflow use the `checked_*` methods.

/// Renders `major.minor` with two decimals, no currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

/// Lets cart totals be written as `items.map(..).sum()`.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let money = Money::from_minor(1099);
        assert_eq!(money.minor(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(600, 0).minor(), 60000);
        assert_eq!(Money::from_major_minor(-5, 50).minor(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(100000).to_string(), "1000.00");
        assert_eq!(Money::from_minor(1099).to_string(), "10.99");
        assert_eq!(Money::from_minor(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);
        assert_eq!((a * 3).minor(), 3000);

        let mut c = a;
        c += b;
        c -= Money::from_minor(100);
        assert_eq!(c.minor(), 1400);
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_wrapping() {
        let huge = Money::from_minor(5_000_000_000_000_000_000);

        assert_eq!(huge + huge, Money::from_minor(i64::MAX));
        assert_eq!(huge * 2, Money::from_minor(i64::MAX));
        assert_eq!(huge.multiply_quantity(3), Money::from_minor(i64::MAX));
        assert_eq!(
            Money::from_minor(i64::MIN) - Money::from_minor(1),
            Money::from_minor(i64::MIN)
        );

        let total: Money = [huge, huge, huge].into_iter().sum();
        assert!(total.is_positive());
    }

    #[test]
    fn test_checked_operations() {
        let huge = Money::from_minor(5_000_000_000_000_000_000);

        assert_eq!(huge.checked_add(huge), None);
        assert_eq!(huge.checked_multiply_quantity(2), None);
        assert_eq!(
            Money::from_minor(299).checked_multiply_quantity(3),
            Some(Money::from_minor(897))
        );
        assert_eq!(
            Money::from_minor(1000).checked_add(Money::from_minor(500)),
            Some(Money::from_minor(1500))
        );
    }

    #[test]
    fn test_sum() {
        let total: Money = [200000, 50000]
            .into_iter()
            .map(Money::from_minor)
            .sum();
        assert_eq!(total, Money::from_major_minor(2500, 0));
    }

    #[test]
    fn test_percentage_exact() {
        let cart = Money::from_major_minor(2500, 0);
        assert_eq!(
            cart.percentage(PercentRate::from_percentage(50.0)),
            Money::from_major_minor(1250, 0)
        );
        assert_eq!(
            cart.percentage(PercentRate::from_percentage(100.0)),
            cart
        );
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 0.05 at 10% = 0.005 → 0.01
        let amount = Money::from_minor(5);
        assert_eq!(amount.percentage(PercentRate::from_bps(1000)).minor(), 1);

        // 0.04 at 10% = 0.004 → 0.00
        let amount = Money::from_minor(4);
        assert_eq!(amount.percentage(PercentRate::from_bps(1000)).minor(), 0);
    }

    #[test]
    fn test_percentage_large_amount_does_not_overflow() {
        let amount = Money::from_minor(i64::MAX / 2);
        let half = amount.percentage(PercentRate::from_percentage(50.0));
        assert!(half.is_positive());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_minor(100).is_positive());
        assert!(Money::from_minor(-100).is_negative());
        assert_eq!(Money::default(), zero);
    }

    #[test]
    fn test_ordering_supports_min() {
        let discount = Money::from_minor(80000);
        let cap = Money::from_minor(50000);
        assert_eq!(discount.min(cap), cap);
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&Money::from_minor(60000)).unwrap();
        assert_eq!(json, "60000");
        let parsed: Money = serde_json::from_str("2500").unwrap();
        assert_eq!(parsed.minor(), 2500);
    }
}
