//! # checkout-stripe
//!
//! Stripe provider for storefront-checkout-rs.
//!
//! Implements `checkout_core::CheckoutProvider` against the Checkout
//! Sessions API:
//!
//! 1. **create** - `POST /v1/checkout/sessions` with dynamic line items
//! 2. **retrieve** - `GET /v1/checkout/sessions/{id}` with payment and
//!    customer detail expanded
//! 3. **list line items** - `GET /v1/checkout/sessions/{id}/line_items`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_stripe::StripeCheckoutClient;
//! use checkout_core::{CheckoutCart, CheckoutProvider, RedirectUrls};
//!
//! // Reads STRIPE_SECRET_KEY from the environment
//! let stripe = StripeCheckoutClient::from_env()?;
//!
//! let session = stripe
//!     .create_session(&cart, &RedirectUrls::new("https://www.copperline.store"))
//!     .await?;
//!
//! // Redirect the customer to session.url
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::StripeCheckoutClient;
pub use config::StripeConfig;
