//! # checkout-api
//!
//! HTTP API layer for storefront-checkout-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The two checkout endpoints plus a health check
//! - CORS restricted to the configured storefront origin
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/create-checkout-session` | Create a hosted checkout session |
//! | OPTIONS | `/create-checkout-session` | CORS preflight |
//! | GET | `/order-details?session_id=` | Session summary lookup |
//! | GET | `/health` | Health check |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
