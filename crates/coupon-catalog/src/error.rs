//! # Catalog Error Types
//!
//! Error types for catalog operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError::InvalidCoupon (coupon-core)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← Adds duplicate/unknown/redemption cases  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in coupon-api) ← Serialized for the HTTP client             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use coupon_core::{CoreError, ValidationErrors};
use thiserror::Error;

/// Catalog operation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The coupon definition has one or more violations.
    ///
    /// ## When This Occurs
    /// - `create` with an incomplete or inconsistent definition
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// A coupon with this code is already in the catalog.
    ///
    /// ## When This Occurs
    /// - `create` with a code that exists (codes are case-sensitive)
    #[error("Coupon with code {code} already exists")]
    DuplicateCode { code: String },

    /// No coupon with this code.
    #[error("Coupon not found: {code}")]
    NotFound { code: String },

    /// Redemption attempted outside the validity window.
    #[error("Coupon {code} is not valid at this time")]
    NotActive { code: String },

    /// Redemption would exceed the per-user limit.
    #[error("Usage limit exceeded for coupon {code}")]
    UsageLimitExceeded { code: String },
}

impl CatalogError {
    pub fn not_found(code: impl Into<String>) -> Self {
        CatalogError::NotFound { code: code.into() }
    }

    pub fn duplicate(code: impl Into<String>) -> Self {
        CatalogError::DuplicateCode { code: code.into() }
    }
}

impl From<CoreError> for CatalogError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidCoupon(errors) => CatalogError::Validation(errors),
            CoreError::Validation(error) => CatalogError::Validation(vec![error].into()),
        }
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
