//! # Application State
//!
//! Shared state for the axum application: the payment provider behind
//! its trait object, server-built redirect URLs, and the configuration
//! loaded once at startup.

use checkout_core::{
    BillingAddressCollection, BoxedCheckoutProvider, RedirectUrls, SessionOptions,
};
use checkout_stripe::StripeCheckoutClient;
use std::collections::HashMap;
use std::sync::Arc;

/// Production site origin, used when `SITE_URL` is not set
pub const DEFAULT_SITE_URL: &str = "https://www.copperline.store";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Trusted site origin for redirect URLs
    pub site_url: String,
    /// The one origin allowed by CORS
    pub allow_origin: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Let customers enter promotion codes
    pub allow_promotion_codes: bool,
    /// Billing address collection mode
    pub billing_address_collection: BillingAddressCollection,
    /// Ask for a phone number on the hosted page
    pub collect_phone_number: bool,
    /// Enable provider-side automatic tax
    pub automatic_tax: bool,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let site_url =
            std::env::var("SITE_URL").unwrap_or_else(|_| DEFAULT_SITE_URL.to_string());
        let allow_origin =
            std::env::var("ALLOW_ORIGIN").unwrap_or_else(|_| site_url.clone());

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4242),
            site_url,
            allow_origin,
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            allow_promotion_codes: env_flag("ALLOW_PROMOTION_CODES", true),
            billing_address_collection: BillingAddressCollection::parse(
                &std::env::var("BILLING_ADDRESS_COLLECTION").unwrap_or_default(),
            ),
            collect_phone_number: env_flag("PHONE_NUMBER_COLLECTION", false),
            automatic_tax: env_flag("AUTOMATIC_TAX", false),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Session toggles derived from this configuration
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            allow_promotion_codes: self.allow_promotion_codes,
            billing_address_collection: self.billing_address_collection,
            collect_phone_number: self.collect_phone_number,
            automatic_tax: self.automatic_tax,
        }
    }

    /// Site identifier attached as session metadata (the bare domain)
    pub fn site_tag(&self) -> String {
        self.site_url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_start_matches("www.")
            .trim_end_matches('/')
            .to_string()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The payment provider, swappable for a stub in tests
    pub provider: BoxedCheckoutProvider,
    /// Server-built redirect URLs
    pub urls: RedirectUrls,
    /// Session toggles from configuration
    pub options: SessionOptions,
    /// Application config
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create state with the Stripe provider configured from the environment
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let stripe = StripeCheckoutClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;
        Ok(Self::with_provider(Arc::new(stripe), config))
    }

    /// Create state around an explicit provider (used by tests)
    pub fn with_provider(provider: BoxedCheckoutProvider, config: AppConfig) -> Self {
        let urls = RedirectUrls::new(&config.site_url);
        let options = config.session_options();
        Self {
            provider,
            urls,
            options,
            config: Arc::new(config),
        }
    }

    /// Reconciliation tags attached to every created session
    pub fn session_metadata(&self) -> HashMap<String, String> {
        let mut metadata = HashMap::new();
        metadata.insert("site".to_string(), self.config.site_tag());
        metadata.insert("env".to_string(), self.config.environment.clone());
        metadata
    }
}
