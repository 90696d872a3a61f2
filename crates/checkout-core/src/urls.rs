//! # Redirect URLs
//!
//! Server-built success/cancel URLs for the hosted checkout flow.
//!
//! Redirect targets are never taken from client input. The handler builds
//! them from the configured site origin, so a request cannot steer a paid
//! session to an arbitrary URL.

/// Token the provider substitutes with the real session id after payment
pub const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Trusted redirect targets derived from the configured site origin
#[derive(Debug, Clone)]
pub struct RedirectUrls {
    base_url: String,
    success_path: String,
    cancel_path: String,
}

impl RedirectUrls {
    /// Build redirect URLs for a site origin. Trailing slashes on the
    /// origin are tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base: String = base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            base_url: base,
            success_path: "/success/".to_string(),
            cancel_path: "/cart/".to_string(),
        }
    }

    /// Builder: override the success page path
    pub fn with_success_path(mut self, path: impl Into<String>) -> Self {
        self.success_path = path.into();
        self
    }

    /// Builder: override the cancel page path
    pub fn with_cancel_path(mut self, path: impl Into<String>) -> Self {
        self.cancel_path = path.into();
        self
    }

    /// The site origin these URLs are rooted at
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Success URL with the provider's session-id placeholder embedded
    pub fn success_url(&self) -> String {
        format!(
            "{}{}?session_id={}",
            self.base_url, self.success_path, SESSION_ID_PLACEHOLDER
        )
    }

    /// Cancel URL (back to the cart page)
    pub fn cancel_url(&self) -> String {
        format!("{}{}", self.base_url, self.cancel_path)
    }
}
