//! # Request Handlers
//!
//! Axum request handlers for the checkout API: session creation,
//! order-details lookup, preflight, and method guards.

use crate::state::AppState;
use axum::{
    extract::rejection::JsonRejection,
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use checkout_core::{normalize_cart, CartItem, CheckoutCart, CheckoutError, SessionSummary};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create checkout request
#[derive(Debug, Default, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Raw cart items from the storefront
    #[serde(default)]
    pub items: Vec<CartItem>,
}

/// Create checkout response
#[derive(Debug, Serialize)]
pub struct CreateCheckoutResponse {
    /// Provider session id
    pub id: String,
    /// Hosted checkout URL (redirect the customer here)
    pub url: String,
    /// Session expiration time, when the provider reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

/// Error response: always a single `error` string, nothing else
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

fn error_response(err: &CheckoutError) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.client_message())))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "storefront-checkout",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a hosted checkout session for a cart
#[instrument(skip(state, body))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    body: Result<Json<CreateCheckoutRequest>, JsonRejection>,
) -> Result<Json<CreateCheckoutResponse>, (StatusCode, Json<ErrorResponse>)> {
    // An unreadable or missing body is treated as an empty cart, so it
    // falls out as the same client error as `{"items": []}`.
    let request = body.map(|Json(r)| r).unwrap_or_default();

    if request.items.is_empty() {
        return Err(error_response(&CheckoutError::NoItems));
    }

    let line_items = normalize_cart(&request.items);
    if line_items.is_empty() {
        info!(
            "all {} cart items dropped during normalization",
            request.items.len()
        );
        return Err(error_response(&CheckoutError::NoPurchasableItems));
    }

    let mut cart = CheckoutCart::new(line_items).with_options(state.options.clone());
    cart.metadata = state.session_metadata();

    info!(
        "Creating checkout: {} items, total={} minor units, success_url={}",
        cart.line_items.len(),
        cart.total(),
        state.urls.success_url()
    );

    let session = state
        .provider
        .create_session(&cart, &state.urls)
        .await
        .map_err(|e| {
            error!("Checkout session creation failed: {}", e);
            error_response(&e)
        })?;

    info!("Created checkout session: {}", session.id);

    Ok(Json(CreateCheckoutResponse {
        id: session.id,
        url: session.url,
        expires_at: session.expires_at.map(|t| t.to_rfc3339()),
    }))
}

/// Query parameters for the order-details lookup
#[derive(Debug, Default, Deserialize)]
pub struct OrderDetailsQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Fetch a session and its line items, reshaped into a client summary
#[instrument(skip(state, query))]
pub async fn order_details(
    State(state): State<AppState>,
    Query(query): Query<OrderDetailsQuery>,
) -> Result<Json<SessionSummary>, (StatusCode, Json<ErrorResponse>)> {
    let session_id = match query.session_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return Err(error_response(&CheckoutError::MissingSessionId)),
    };

    let detail = state
        .provider
        .retrieve_session(&session_id)
        .await
        .map_err(|e| {
            error!("Session lookup failed for {}: {}", session_id, e);
            error_response(&e)
        })?;

    let items = state
        .provider
        .list_line_items(&session_id)
        .await
        .map_err(|e| {
            error!("Line-item listing failed for {}: {}", session_id, e);
            error_response(&e)
        })?;

    Ok(Json(SessionSummary::compose(detail, items)))
}

/// Bare OPTIONS on the creation endpoint. Real CORS preflights are
/// answered by the CORS layer before they reach this handler.
pub async fn checkout_preflight() -> StatusCode {
    StatusCode::OK
}

/// 405 guard for the creation endpoint
pub async fn checkout_method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST, OPTIONS")],
        Json(ErrorResponse::new("Method Not Allowed")),
    )
}

/// 405 guard for the order-details endpoint
pub async fn order_details_method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET")],
        Json(ErrorResponse::new("Method Not Allowed")),
    )
}
