//! # Coupon Catalog
//!
//! The in-memory set of coupons, keyed by code.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Mutations                       │  Reads                               │
//! │  ─────────                       │  ─────                               │
//! │  create(def)  validate → unique  │  get(code)                           │
//! │  delete(code) → bool             │  list()           code order         │
//! │  redeem(code, user, now)         │  find_best_coupon[_at]               │
//! │    window → limit → increment    │  applicable_coupons[_at]             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog itself is single-owner. Callers that share it across tasks
//! wrap it in a lock; evaluation only needs `&self`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use coupon_core::{
    applicable_coupons, find_best_coupon, BestCoupon, Cart, Coupon, CouponDefinition,
    CouponVerdict, User,
};
use tracing::{debug, info, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::seed;

/// Coupons by code. Codes are unique and case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct CouponCatalog {
    coupons: BTreeMap<String, Coupon>,
}

impl CouponCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog holding the fixture coupons from [`seed::definitions`].
    ///
    /// ## Errors
    /// Propagates a validation failure if a fixture is broken.
    pub fn seeded() -> CatalogResult<Self> {
        let mut catalog = Self::new();
        for definition in seed::definitions() {
            catalog.create(definition)?;
        }
        info!(count = catalog.len(), "Catalog seeded");
        Ok(catalog)
    }

    /// Validates and inserts a coupon.
    ///
    /// Validation runs before the duplicate check, so a broken definition
    /// reports its violations even if its code is taken.
    pub fn create(&mut self, definition: CouponDefinition) -> CatalogResult<&Coupon> {
        let coupon = Coupon::new(definition).map_err(|err| {
            warn!(error = %err, "Rejected coupon definition");
            CatalogError::from(err)
        })?;

        if self.coupons.contains_key(&coupon.code) {
            warn!(code = %coupon.code, "Duplicate coupon code");
            return Err(CatalogError::duplicate(coupon.code));
        }

        info!(code = %coupon.code, discount_type = %coupon.discount_type, "Coupon created");
        let code = coupon.code.clone();
        Ok(self.coupons.entry(code).or_insert(coupon))
    }

    pub fn get(&self, code: &str) -> Option<&Coupon> {
        self.coupons.get(code)
    }

    /// Removes a coupon. Returns whether anything was removed.
    pub fn delete(&mut self, code: &str) -> bool {
        let removed = self.coupons.remove(code).is_some();
        if removed {
            info!(code = %code, "Coupon deleted");
        }
        removed
    }

    /// Every coupon, ordered by code.
    pub fn list(&self) -> impl Iterator<Item = &Coupon> {
        self.coupons.values()
    }

    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }

    /// Records one redemption of `code` by `user_id`.
    ///
    /// ## Flow
    /// ```text
    /// unknown code?            ──► NotFound
    /// now outside window?      ──► NotActive
    /// usage ≥ limit?           ──► UsageLimitExceeded
    /// otherwise                ──► counter + 1, returns new count
    /// ```
    pub fn redeem(&mut self, code: &str, user_id: &str, now: DateTime<Utc>) -> CatalogResult<u32> {
        let coupon = self
            .coupons
            .get_mut(code)
            .ok_or_else(|| CatalogError::not_found(code))?;

        if !coupon.is_date_valid(now) {
            return Err(CatalogError::NotActive {
                code: code.to_string(),
            });
        }

        if coupon.has_exceeded_usage_limit(user_id) {
            return Err(CatalogError::UsageLimitExceeded {
                code: code.to_string(),
            });
        }

        let count = coupon.increment_usage(user_id);
        info!(code = %code, user_id = %user_id, count, "Coupon redeemed");
        Ok(count)
    }

    /// Best coupon for a checkout, evaluated at the current time.
    pub fn find_best_coupon(&self, user: &User, cart: &Cart) -> Option<BestCoupon> {
        self.find_best_coupon_at(user, cart, Utc::now())
    }

    pub fn find_best_coupon_at(
        &self,
        user: &User,
        cart: &Cart,
        now: DateTime<Utc>,
    ) -> Option<BestCoupon> {
        debug!(user_id = %user.user_id, coupons = self.len(), "Finding best coupon");
        find_best_coupon(self.coupons.values(), user, cart, now)
    }

    /// One verdict per coupon, evaluated at the current time.
    pub fn applicable_coupons(&self, user: &User, cart: &Cart) -> Vec<CouponVerdict> {
        self.applicable_coupons_at(user, cart, Utc::now())
    }

    pub fn applicable_coupons_at(
        &self,
        user: &User,
        cart: &Cart,
        now: DateTime<Utc>,
    ) -> Vec<CouponVerdict> {
        debug!(user_id = %user.user_id, coupons = self.len(), "Listing applicable coupons");
        applicable_coupons(self.coupons.values(), user, cart, now)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
