//! # Coupon API
//!
//! HTTP server binary.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ApiConfig::load() ──► init_tracing ──► catalog (seeded or empty)      │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                      bind ──► axum::serve ──► graceful shutdown        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use coupon_api::telemetry::init_tracing;
use coupon_api::{router, ApiConfig, AppState};
use coupon_catalog::CouponCatalog;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.log_level);

    info!("Starting Coupon API server...");

    let catalog = if config.seed {
        CouponCatalog::seeded().context("Failed to load seed coupons")?
    } else {
        CouponCatalog::new()
    };
    info!(coupons = catalog.len(), seeded = config.seed, "Catalog ready");

    let app = router(AppState::new(catalog));

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
