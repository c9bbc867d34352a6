//! # Route Handlers
//!
//! One handler per endpoint. Handlers validate input, take the catalog
//! lock for as long as the operation needs, and wrap results in
//! [`Envelope`].
//!
//! ## Locking
//! ```text
//! read lock   list, get, best-coupon, applicable-coupons
//! write lock  create, delete, redeem
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use coupon_core::validation::{validate_checkout, validate_code, validate_required};
use coupon_core::{BestCoupon, Cart, Coupon, CouponDefinition, CouponVerdict, User};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

// =============================================================================
// Envelope
// =============================================================================

/// Success body shared by every endpoint.
///
/// ```json
/// { "success": true, "message": "...", "count": 7, "data": [...] }
/// ```
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Envelope {
            success: true,
            message: None,
            count: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl Envelope<()> {
    /// A body with a message and no `data` key.
    pub fn message(message: impl Into<String>) -> Self {
        Envelope {
            success: true,
            message: Some(message.into()),
            count: None,
            data: None,
        }
    }
}

// =============================================================================
// Request Bodies
// =============================================================================

/// Body of the evaluation endpoints.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub user: User,
    pub cart: Cart,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRequest {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Redemption {
    pub code: String,
    pub user_id: String,
    pub usage_count: u32,
}

// =============================================================================
// Service Endpoints
// =============================================================================

pub async fn index() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Welcome to the Coupon API",
        "endpoints": {
            "health": "GET /api/health",
            "createCoupon": "POST /api/coupons",
            "getAllCoupons": "GET /api/coupons",
            "getCoupon": "GET /api/coupons/{code}",
            "deleteCoupon": "DELETE /api/coupons/{code}",
            "redeemCoupon": "POST /api/coupons/{code}/redeem",
            "findBestCoupon": "POST /api/coupons/best-coupon",
            "getApplicableCoupons": "POST /api/coupons/applicable-coupons",
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let coupons = state.catalog.read().await.len();
    Json(json!({
        "success": true,
        "message": "Coupon API is running",
        "coupons": coupons,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("Endpoint not found")
}

// =============================================================================
// Catalog Endpoints
// =============================================================================

pub async fn create_coupon(
    State(state): State<AppState>,
    payload: Result<Json<CouponDefinition>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<Coupon>>)> {
    let Json(definition) = payload?;

    let mut catalog = state.catalog.write().await;
    let coupon = catalog.create(definition)?.clone();

    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(coupon).with_message("Coupon created successfully")),
    ))
}

pub async fn list_coupons(State(state): State<AppState>) -> Json<Envelope<Vec<Coupon>>> {
    let catalog = state.catalog.read().await;
    let coupons: Vec<Coupon> = catalog.list().cloned().collect();
    let count = coupons.len();

    Json(Envelope::data(coupons).with_count(count))
}

pub async fn get_coupon(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<Envelope<Coupon>>> {
    let catalog = state.catalog.read().await;
    let coupon = catalog
        .get(&code)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Coupon not found"))?;

    Ok(Json(Envelope::data(coupon)))
}

pub async fn delete_coupon(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<Envelope<()>>> {
    let mut catalog = state.catalog.write().await;
    if !catalog.delete(&code) {
        return Err(ApiError::not_found("Coupon not found"));
    }

    Ok(Json(Envelope::message("Coupon deleted successfully")))
}

pub async fn redeem_coupon(
    State(state): State<AppState>,
    Path(code): Path<String>,
    payload: Result<Json<RedeemRequest>, JsonRejection>,
) -> ApiResult<Json<Envelope<Redemption>>> {
    let Json(request) = payload?;
    validate_code(&code)?;
    validate_required("userId", &request.user_id)?;

    let mut catalog = state.catalog.write().await;
    let usage_count = catalog.redeem(&code, &request.user_id, Utc::now())?;

    Ok(Json(
        Envelope::data(Redemption {
            code,
            user_id: request.user_id,
            usage_count,
        })
        .with_message("Coupon redeemed successfully"),
    ))
}

// =============================================================================
// Evaluation Endpoints
// =============================================================================

pub async fn best_coupon(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> ApiResult<Json<Envelope<Option<BestCoupon>>>> {
    let Json(CheckoutRequest { user, cart }) = payload?;
    validate_checkout(&user, &cart)?;

    let catalog = state.catalog.read().await;
    let best = catalog.find_best_coupon(&user, &cart);
    debug!(
        user_id = %user.user_id,
        found = best.is_some(),
        "Best coupon request evaluated"
    );

    let message = if best.is_some() {
        "Best coupon found"
    } else {
        "No applicable coupon found"
    };

    Ok(Json(Envelope::data(best).with_message(message)))
}

pub async fn applicable_coupons(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> ApiResult<Json<Envelope<Vec<CouponVerdict>>>> {
    let Json(CheckoutRequest { user, cart }) = payload?;
    validate_checkout(&user, &cart)?;

    let catalog = state.catalog.read().await;
    let verdicts = catalog.applicable_coupons(&user, &cart);
    let count = verdicts.len();

    Ok(Json(Envelope::data(verdicts).with_count(count)))
}
