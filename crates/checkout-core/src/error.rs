//! # Checkout Error Types
//!
//! Typed error handling for the checkout service.
//! All checkout operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The request carried no items at all
    #[error("no items provided")]
    NoItems,

    /// Items were provided but none survived normalization
    #[error("no purchasable items in cart")]
    NoPurchasableItems,

    /// The session lookup was called without a session id
    #[error("missing session_id")]
    MissingSessionId,

    /// Configuration errors (missing keys, invalid config)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Payment provider rejected or failed the call
    #[error("provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Network/HTTP error communicating with the provider
    #[error("network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl CheckoutError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::NoItems => 400,
            CheckoutError::NoPurchasableItems => 400,
            CheckoutError::MissingSessionId => 400,
            CheckoutError::Configuration(_) => 500,
            CheckoutError::Provider { .. } => 500,
            CheckoutError::Network(_) => 500,
            CheckoutError::Serialization(_) => 500,
        }
    }

    /// The message exposed to HTTP clients.
    ///
    /// Validation errors spell out what was wrong with the request.
    /// Provider, network and config failures collapse to a generic
    /// message; the detail is only ever logged server-side.
    pub fn client_message(&self) -> &'static str {
        match self {
            CheckoutError::NoItems => "No items provided",
            CheckoutError::NoPurchasableItems => "No purchasable items",
            CheckoutError::MissingSessionId => "Missing session_id",
            CheckoutError::Configuration(_)
            | CheckoutError::Provider { .. }
            | CheckoutError::Network(_)
            | CheckoutError::Serialization(_) => "Server error",
        }
    }

    /// True when the caller can fix the request (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;
