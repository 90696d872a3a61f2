//! # checkout-core
//!
//! Core types and cart normalization for the storefront checkout service.
//!
//! This crate provides:
//! - `CartItem` and `LineItem` with the normalization rules that keep
//!   malformed client carts from reaching the payment provider
//! - `CheckoutProvider` trait implemented by provider crates
//! - `CheckoutCart`, `CreatedSession`, `SessionSummary` for the two
//!   request/response cycles
//! - `RedirectUrls` for server-built success/cancel targets
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{normalize_cart, CheckoutCart, RedirectUrls};
//!
//! let line_items = normalize_cart(&raw_items);
//! if line_items.is_empty() {
//!     return Err(CheckoutError::NoPurchasableItems);
//! }
//!
//! let cart = CheckoutCart::new(line_items).with_metadata("site", "copperline.store");
//! let urls = RedirectUrls::new("https://www.copperline.store");
//!
//! let session = provider.create_session(&cart, &urls).await?;
//! // Redirect the customer to session.url
//! ```

pub mod cart;
pub mod error;
pub mod provider;
pub mod session;
pub mod urls;

// Re-exports for convenience
pub use cart::{
    normalize_cart, normalize_item, to_minor_units, CartItem, LineItem, DEFAULT_ITEM_NAME,
    MAX_NAME_CHARS,
};
pub use error::{CheckoutError, CheckoutResult};
pub use provider::{BoxedCheckoutProvider, CheckoutProvider};
pub use session::{
    BillingAddressCollection, CheckoutCart, CreatedSession, SessionDetail, SessionLineItem,
    SessionOptions, SessionSummary, SummaryLineItem,
};
pub use urls::{RedirectUrls, SESSION_ID_PLACEHOLDER};
