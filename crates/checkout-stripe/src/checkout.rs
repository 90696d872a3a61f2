//! # Stripe Checkout Sessions
//!
//! Implementation of the Stripe Checkout Sessions API: create a hosted
//! session for a cart, retrieve a session, list its line items.
//!
//! Stripe's API is form-encoded on the way in and JSON on the way out.
//! Requests are built as flat `key=value` pairs with Stripe's bracket
//! indexing (`line_items[0][price_data][unit_amount]`).

use crate::config::StripeConfig;
use async_trait::async_trait;
use checkout_core::{
    CheckoutCart, CheckoutError, CheckoutProvider, CheckoutResult, CreatedSession, RedirectUrls,
    SessionDetail, SessionLineItem,
};
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

/// All sessions are created in this currency; amounts are minor units
const CHECKOUT_CURRENCY: &str = "usd";

/// Page size for the line-item listing, sized to cover typical carts
const LINE_ITEMS_PAGE_SIZE: &str = "100";

/// Stripe hosted-checkout provider
///
/// Uses Stripe's hosted checkout page for secure payments.
/// This is the recommended approach for PCI compliance.
pub struct StripeCheckoutClient {
    config: StripeConfig,
    client: Client,
}

impl StripeCheckoutClient {
    /// Create a new Stripe checkout client
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Build the form parameters for session creation
    fn build_create_form(cart: &CheckoutCart, urls: &RedirectUrls) -> Vec<(String, String)> {
        let mut form: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("payment_method_types[0]".to_string(), "card".to_string()),
            ("success_url".to_string(), urls.success_url()),
            ("cancel_url".to_string(), urls.cancel_url()),
        ];

        for (i, item) in cart.line_items.iter().enumerate() {
            form.push((
                format!("line_items[{}][price_data][currency]", i),
                CHECKOUT_CURRENCY.to_string(),
            ));
            form.push((
                format!("line_items[{}][price_data][unit_amount]", i),
                item.unit_amount.to_string(),
            ));
            form.push((
                format!("line_items[{}][price_data][product_data][name]", i),
                item.name.clone(),
            ));
            if let Some(ref image) = item.image_url {
                form.push((
                    format!("line_items[{}][price_data][product_data][images][0]", i),
                    image.clone(),
                ));
            }
            form.push((
                format!("line_items[{}][quantity]", i),
                item.quantity.to_string(),
            ));
        }

        let options = &cart.options;
        form.push((
            "allow_promotion_codes".to_string(),
            options.allow_promotion_codes.to_string(),
        ));
        form.push((
            "billing_address_collection".to_string(),
            options.billing_address_collection.as_str().to_string(),
        ));
        form.push((
            "phone_number_collection[enabled]".to_string(),
            options.collect_phone_number.to_string(),
        ));
        // Only sent when enabled; requires tax settings in the Stripe account
        if options.automatic_tax {
            form.push(("automatic_tax[enabled]".to_string(), "true".to_string()));
        }

        for (key, value) in &cart.metadata {
            form.push((format!("metadata[{}]", key), value.clone()));
        }

        form
    }

    /// Send a request, mapping transport failures and Stripe error
    /// bodies into `CheckoutError`. Returns the raw success body.
    async fn execute(&self, request: reqwest::RequestBuilder) -> CheckoutResult<String> {
        let response = request
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                let mut message = error_response.error.message;
                if let Some(code) = error_response.error.code {
                    message = format!("{} ({})", message, code);
                }
                return Err(CheckoutError::Provider {
                    provider: "stripe".to_string(),
                    message,
                });
            }

            return Err(CheckoutError::Provider {
                provider: "stripe".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl CheckoutProvider for StripeCheckoutClient {
    #[instrument(skip(self, cart, urls), fields(items = cart.line_items.len()))]
    async fn create_session(
        &self,
        cart: &CheckoutCart,
        urls: &RedirectUrls,
    ) -> CheckoutResult<CreatedSession> {
        if cart.is_empty() {
            return Err(CheckoutError::NoPurchasableItems);
        }

        let form = Self::build_create_form(cart, urls);

        debug!(
            "Creating Stripe checkout session: {} items, total={}",
            cart.line_items.len(),
            cart.total()
        );

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);
        let body = self.execute(self.client.post(&url).form(&form)).await?;

        let session: StripeSessionResponse = serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        info!(
            "Created Stripe checkout session: id={}, url={}",
            session.id, session.url
        );

        Ok(CreatedSession {
            id: session.id,
            url: session.url,
            expires_at: session
                .expires_at
                .and_then(|ts| DateTime::from_timestamp(ts, 0)),
        })
    }

    #[instrument(skip(self))]
    async fn retrieve_session(&self, session_id: &str) -> CheckoutResult<SessionDetail> {
        let url = format!(
            "{}/v1/checkout/sessions/{}",
            self.config.api_base_url, session_id
        );

        let body = self
            .execute(self.client.get(&url).query(&[
                ("expand[]", "payment_intent"),
                ("expand[]", "customer_details"),
            ]))
            .await?;

        let session: StripeSessionDetailResponse = serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        debug!("Retrieved Stripe session: id={}", session.id);

        // Email fallback chain: detailed customer info, then the
        // top-level session field, then nothing.
        let customer_email = session
            .customer_details
            .and_then(|d| d.email)
            .or(session.customer_email);

        Ok(SessionDetail {
            id: session.id,
            customer_email,
            currency: session.currency,
            amount_total: session.amount_total,
            payment_status: session.payment_status,
        })
    }

    #[instrument(skip(self))]
    async fn list_line_items(&self, session_id: &str) -> CheckoutResult<Vec<SessionLineItem>> {
        let url = format!(
            "{}/v1/checkout/sessions/{}/line_items",
            self.config.api_base_url, session_id
        );

        let body = self
            .execute(self.client.get(&url).query(&[("limit", LINE_ITEMS_PAGE_SIZE)]))
            .await?;

        let list: StripeLineItemList = serde_json::from_str(&body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })?;

        debug!(
            "Listed {} line items for session {}",
            list.data.len(),
            session_id
        );

        Ok(list
            .data
            .into_iter()
            .map(|item| SessionLineItem {
                description: item.description,
                quantity: item.quantity,
                unit_amount: item.price.as_ref().and_then(|p| p.unit_amount),
                currency: item.price.and_then(|p| p.currency),
            })
            .collect())
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeSessionResponse {
    id: String,
    url: String,
    #[serde(default)]
    expires_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeSessionDetailResponse {
    id: String,
    #[serde(default)]
    customer_email: Option<String>,
    #[serde(default)]
    customer_details: Option<StripeCustomerDetails>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    amount_total: Option<i64>,
    payment_status: String,
}

#[derive(Debug, Deserialize)]
struct StripeCustomerDetails {
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeLineItemList {
    data: Vec<StripeLineItemObject>,
}

#[derive(Debug, Deserialize)]
struct StripeLineItemObject {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    quantity: Option<i64>,
    #[serde(default)]
    price: Option<StripePrice>,
}

#[derive(Debug, Deserialize)]
struct StripePrice {
    #[serde(default)]
    unit_amount: Option<i64>,
    #[serde(default)]
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeApiError,
}

#[derive(Debug, Deserialize)]
struct StripeApiError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}
