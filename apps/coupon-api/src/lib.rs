//! # Coupon API
//!
//! JSON/HTTP server in front of the coupon catalog and selection engine.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Coupon API Routes                               │
//! │                                                                         │
//! │  ┌──────────────────────────┐  ┌──────────────────────────────────────┐│
//! │  │  Catalog                 │  │  Evaluation                          ││
//! │  │                          │  │                                      ││
//! │  │ • POST   /api/coupons    │  │ • POST /api/coupons/best-coupon      ││
//! │  │ • GET    /api/coupons    │  │ • POST /api/coupons/applicable-coupons│
//! │  │ • GET    /api/coupons/{c}│  │                                      ││
//! │  │ • DELETE /api/coupons/{c}│  │  read lock only, never mutates       ││
//! │  │ • POST   .../{c}/redeem  │  │                                      ││
//! │  └──────────────────────────┘  └──────────────────────────────────────┘│
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  AppState: Arc<RwLock<CouponCatalog>>                            │  │
//! │  │  request_log middleware: one line per request, x-request-id      │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `COUPON_API_HOST` - bind address (default: 0.0.0.0)
//! - `COUPON_API_PORT` / `PORT` - HTTP port (default: 5000)
//! - `COUPON_API_SEED` - load fixture coupons (default: true)
//! - `COUPON_API_LOG_LEVEL` - default log filter (default: info)

pub mod config;
pub mod error;
pub mod routes;
pub mod telemetry;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use coupon_catalog::CouponCatalog;
use tokio::sync::RwLock;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ErrorCode};

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<RwLock<CouponCatalog>>,
}

impl AppState {
    pub fn new(catalog: CouponCatalog) -> Self {
        AppState {
            catalog: Arc::new(RwLock::new(catalog)),
        }
    }
}

/// Builds the full router with logging middleware and the 404 fallback.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/api/health", get(routes::health))
        .route(
            "/api/coupons",
            get(routes::list_coupons).post(routes::create_coupon),
        )
        .route("/api/coupons/best-coupon", post(routes::best_coupon))
        .route(
            "/api/coupons/applicable-coupons",
            post(routes::applicable_coupons),
        )
        .route(
            "/api/coupons/{code}",
            get(routes::get_coupon).delete(routes::delete_coupon),
        )
        .route("/api/coupons/{code}/redeem", post(routes::redeem_coupon))
        .fallback(routes::not_found)
        .layer(middleware::from_fn(telemetry::request_log))
        .with_state(state)
}
