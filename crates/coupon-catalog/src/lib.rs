//! # coupon-catalog: In-Memory Coupon Store
//!
//! Holds the coupons an engine instance knows about and runs the
//! selection engine over them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Coupon Engine Data Flow                          │
//! │                                                                         │
//! │  HTTP handler (POST /api/coupons/best-coupon)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  coupon-catalog (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ CouponCatalog │    │     seed      │    │    error     │  │   │
//! │  │   │ (catalog.rs)  │    │  (seed.rs)    │    │  (error.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ code → Coupon │◄───│ WELCOME100    │    │ CatalogError │  │   │
//! │  │   │ create/delete │    │ GOLD50 ...    │    │              │  │   │
//! │  │   │ redeem        │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  coupon-core (validation, eligibility, selection)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is persisted; the catalog lives as long as the process.
//!
//! ## Usage
//!
//! ```rust
//! use coupon_catalog::CouponCatalog;
//!
//! let catalog = CouponCatalog::seeded().unwrap();
//! assert!(catalog.get("WELCOME100").is_some());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::CouponCatalog;
pub use error::{CatalogError, CatalogResult};
