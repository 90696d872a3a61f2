//! # Cart Normalization
//!
//! Turns the raw cart payload sent by the storefront into line items
//! that are safe to hand to a payment provider.
//!
//! Clients are browsers, and browsers send junk: string prices, missing
//! quantities, numeric names. Deserialization is lenient (a field that has
//! the wrong JSON type becomes `None` instead of failing the request) and
//! normalization clamps every field into range. Items that still are not
//! purchasable after clamping are dropped, never a reason to reject the
//! whole cart.

use serde::{Deserialize, Deserializer, Serialize};

/// Display name used when an item arrives without one
pub const DEFAULT_ITEM_NAME: &str = "Copperline Item";

/// Maximum item name length accepted by the provider
pub const MAX_NAME_CHARS: usize = 200;

/// One raw cart entry exactly as the client sent it.
///
/// Every field is optional; type mismatches deserialize to `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number")]
    pub qty: Option<f64>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub image: Option<String>,
}

/// A normalized, provider-ready line item.
///
/// Invariants: `unit_amount >= 0`, `quantity >= 1`, `name` non-empty and
/// at most [`MAX_NAME_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    /// Display name (trimmed, defaulted, length-capped)
    pub name: String,

    /// Unit price in minor currency units (cents)
    pub unit_amount: i64,

    /// Quantity, always at least 1
    pub quantity: u32,

    /// Image URL, passed through only when the client sent a string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl LineItem {
    /// Total price of this line in minor units
    pub fn total(&self) -> i64 {
        self.unit_amount * self.quantity as i64
    }

    /// Whether this item may be sent to the provider.
    ///
    /// Normalization already guarantees quantity and name, so the only
    /// thing that can disqualify an item is a non-positive price.
    pub fn is_purchasable(&self) -> bool {
        self.unit_amount > 0
    }
}

/// Convert a price in major units (dollars) to minor units (cents).
///
/// Rounds half away from zero, so `19.99 -> 1999` and `0.005 -> 1`.
pub fn to_minor_units(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

/// Normalize a single cart entry.
///
/// - price: non-finite or missing becomes 0, negatives clamp to 0
/// - qty: floored and clamped to at least 1
/// - name: trimmed, defaulted when blank, capped at [`MAX_NAME_CHARS`]
/// - image: passed through untouched
pub fn normalize_item(item: &CartItem) -> LineItem {
    let price = item
        .price
        .filter(|p| p.is_finite())
        .map(|p| p.max(0.0))
        .unwrap_or(0.0);

    let quantity = item
        .qty
        .filter(|q| q.is_finite())
        .map(|q| q.floor())
        .unwrap_or(1.0)
        .clamp(1.0, u32::MAX as f64) as u32;

    LineItem {
        name: normalize_name(item.name.as_deref()),
        unit_amount: to_minor_units(price),
        quantity,
        image_url: item.image.clone(),
    }
}

/// Normalize a whole cart, dropping items that are not purchasable.
///
/// An empty result is possible and distinct from an empty input; the
/// caller maps the two cases to different errors.
pub fn normalize_cart(items: &[CartItem]) -> Vec<LineItem> {
    items
        .iter()
        .map(normalize_item)
        .filter(LineItem::is_purchasable)
        .collect()
}

fn normalize_name(name: Option<&str>) -> String {
    let trimmed = name.map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        return DEFAULT_ITEM_NAME.to_string();
    }
    trimmed.chars().take(MAX_NAME_CHARS).collect()
}

/// Accepts a JSON string; any other type becomes `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// Accepts a JSON number or a numeric string; anything else becomes `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
