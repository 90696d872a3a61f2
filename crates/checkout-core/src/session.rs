//! # Session Types
//!
//! The cart handed to a provider, the session it creates, and the
//! read-back summary served by the order-details endpoint.

use crate::cart::LineItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How the provider collects the billing address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingAddressCollection {
    /// Collect only when the provider deems it necessary
    Auto,
    /// Always collect
    Required,
}

impl BillingAddressCollection {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingAddressCollection::Auto => "auto",
            BillingAddressCollection::Required => "required",
        }
    }

    /// Parse a config value; anything unrecognized falls back to `Auto`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "required" => BillingAddressCollection::Required,
            _ => BillingAddressCollection::Auto,
        }
    }
}

impl Default for BillingAddressCollection {
    fn default() -> Self {
        BillingAddressCollection::Auto
    }
}

/// Session toggles that are business configuration, not request data
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Let the customer enter promotion codes on the hosted page
    pub allow_promotion_codes: bool,

    /// Billing address collection mode
    pub billing_address_collection: BillingAddressCollection,

    /// Ask for a phone number on the hosted page
    pub collect_phone_number: bool,

    /// Enable provider-side automatic tax (requires provider tax settings)
    pub automatic_tax: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            allow_promotion_codes: true,
            billing_address_collection: BillingAddressCollection::Auto,
            collect_phone_number: false,
            automatic_tax: false,
        }
    }
}

/// A normalized cart ready to become a checkout session
#[derive(Debug, Clone)]
pub struct CheckoutCart {
    /// Normalized line items, all purchasable
    pub line_items: Vec<LineItem>,

    /// Session toggles from server configuration
    pub options: SessionOptions,

    /// Free-form tags attached to the session for later reconciliation
    /// (site identifier, deployment environment)
    pub metadata: HashMap<String, String>,
}

impl CheckoutCart {
    pub fn new(line_items: Vec<LineItem>) -> Self {
        Self {
            line_items,
            options: SessionOptions::default(),
            metadata: HashMap::new(),
        }
    }

    /// Builder: set session options
    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    /// Builder: attach a metadata tag
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Cart total in minor units
    pub fn total(&self) -> i64 {
        self.line_items.iter().map(LineItem::total).sum()
    }
}

/// A checkout session freshly created by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedSession {
    /// Provider's session id
    pub id: String,

    /// Hosted checkout URL to redirect the customer to
    pub url: String,

    /// When the session expires, if the provider reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Session detail fetched back from the provider.
///
/// `customer_email` is already resolved through the provider's fallback
/// chain (detailed customer info, then the top-level session email).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDetail {
    pub id: String,
    pub customer_email: Option<String>,
    pub currency: Option<String>,
    pub amount_total: Option<i64>,
    pub payment_status: String,
}

/// One line item as reported back by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLineItem {
    pub description: Option<String>,
    pub quantity: Option<i64>,
    /// Unit amount in minor units; absent when the provider omits a price
    pub unit_amount: Option<i64>,
    /// Item-level currency; falls back to the session currency when absent
    pub currency: Option<String>,
}

/// Client-facing summary of a session and its line items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub customer_email: Option<String>,
    pub currency: Option<String>,
    pub amount_total: Option<i64>,
    pub payment_status: String,
    pub line_items: Vec<SummaryLineItem>,
}

/// One line of a [`SessionSummary`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryLineItem {
    pub description: Option<String>,
    pub quantity: Option<i64>,
    pub unit_amount: Option<i64>,
    pub currency: Option<String>,
}

impl SessionSummary {
    /// Compose a summary from session detail and its line items.
    ///
    /// Item-level currency falls back to the session currency; amounts
    /// stay in minor units, presentation is the caller's concern.
    pub fn compose(detail: SessionDetail, items: Vec<SessionLineItem>) -> Self {
        let session_currency = detail.currency.clone();

        let line_items = items
            .into_iter()
            .map(|item| SummaryLineItem {
                description: item.description,
                quantity: item.quantity,
                unit_amount: item.unit_amount,
                currency: item.currency.or_else(|| session_currency.clone()),
            })
            .collect();

        Self {
            id: detail.id,
            customer_email: detail.customer_email,
            currency: detail.currency,
            amount_total: detail.amount_total,
            payment_status: detail.payment_status,
            line_items,
        }
    }
}
