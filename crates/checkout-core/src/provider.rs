//! # Checkout Provider Trait
//!
//! Seam between the HTTP layer and the payment provider. The API crate
//! only ever talks to `dyn CheckoutProvider`, so tests substitute an
//! in-process stub without touching the network.

use crate::error::CheckoutResult;
use crate::session::{CheckoutCart, CreatedSession, SessionDetail, SessionLineItem};
use crate::urls::RedirectUrls;
use async_trait::async_trait;
use std::sync::Arc;

/// A hosted-checkout payment provider.
///
/// One implementation per provider (Stripe today). Every method is a
/// single outbound network call with no local side effects.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Create a hosted checkout session for a normalized cart.
    ///
    /// # Arguments
    /// * `cart` - Normalized line items plus session options and metadata
    /// * `urls` - Server-built success/cancel redirect targets
    async fn create_session(
        &self,
        cart: &CheckoutCart,
        urls: &RedirectUrls,
    ) -> CheckoutResult<CreatedSession>;

    /// Fetch session detail (with payment and customer sub-objects
    /// expanded) for the order-details endpoint.
    async fn retrieve_session(&self, session_id: &str) -> CheckoutResult<SessionDetail>;

    /// Fetch the line items recorded on a session. One page, sized to
    /// cover typical carts.
    async fn list_line_items(&self, session_id: &str) -> CheckoutResult<Vec<SessionLineItem>>;

    /// Provider name for logging
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared provider (dynamic dispatch)
pub type BoxedCheckoutProvider = Arc<dyn CheckoutProvider>;
