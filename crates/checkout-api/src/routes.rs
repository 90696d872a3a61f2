//! # Routes
//!
//! Axum router configuration for the checkout API.

use crate::handlers;
use crate::state::{AppState, DEFAULT_SITE_URL};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - POST    /create-checkout-session - Create a hosted checkout session
/// - OPTIONS /create-checkout-session - CORS preflight
/// - GET     /order-details           - Session summary lookup
/// - GET     /health                  - Health check
///
/// Any other verb on the two API paths answers 405 with an `Allow` header.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allow_origin);

    // The creation endpoint is the only browser-facing surface, so the
    // CORS layer is scoped to it.
    let checkout_routes = Router::new()
        .route(
            "/create-checkout-session",
            post(handlers::create_checkout_session)
                .options(handlers::checkout_preflight)
                .fallback(handlers::checkout_method_not_allowed),
        )
        .layer(cors);

    let order_routes = Router::new().route(
        "/order-details",
        get(handlers::order_details).fallback(handlers::order_details_method_not_allowed),
    );

    Router::new()
        .route("/health", get(handlers::health))
        .merge(checkout_routes)
        .merge(order_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS restricted to the one configured origin, never a wildcard
fn cors_layer(allow_origin: &str) -> CorsLayer {
    let origin = HeaderValue::from_str(allow_origin).unwrap_or_else(|_| {
        tracing::warn!(
            "ALLOW_ORIGIN is not a valid header value, falling back to the site default"
        );
        HeaderValue::from_static(DEFAULT_SITE_URL)
    });

    CorsLayer::new()
        .allow_origin(AllowOrigin::exact(origin))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
