//! # storefront-checkout
//!
//! Hosted-checkout service for the Copperline storefront.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export SITE_URL=https://www.copperline.store
//!
//! # Run the server
//! storefront-checkout
//! ```

use checkout_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.provider.provider_name());
    info!("Site origin: {}", state.config.site_url);
    info!("Allowed origin: {}", state.config.allow_origin);

    if !state.config.is_production() {
        info!("Checkout: POST http://{}/create-checkout-session", addr);
        info!("Order details: GET http://{}/order-details", addr);
    }

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("storefront-checkout listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
