//! Mono wire models
//!
//! Request and response payloads of the Mono REST API. Amounts stay in
//! minor units exactly as the provider sends them; conversion happens in
//! [`crate::portfolio`].

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque identifier of one linked account, issued by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================
// Auth
// ============================================

#[derive(Debug, Serialize)]
pub(crate) struct AuthRequest<'a> {
    pub code: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    pub id: String,
}

// ============================================
// Account info
// ============================================

#[derive(Debug, Deserialize)]
pub(crate) struct AccountResponse {
    pub account: AccountDetails,
}

/// Display details of a linked account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub institution: Institution,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

// ============================================
// Assets
// ============================================

#[derive(Debug, Deserialize)]
pub(crate) struct AssetsResponse {
    pub assets: Vec<Asset>,
}

/// An investment position held in a linked account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub asset_type: String,

    /// Unit cost in minor units
    #[serde(default, deserialize_with = "null_as_default")]
    pub cost: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: f64,

    #[serde(rename = "return", default)]
    pub return_amount: Option<f64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,

    /// Provider-specific extras (symbol, price, ...), passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

// ============================================
// Earnings
// ============================================

/// A realised earning (sale, dividend, ...) on a linked account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Earning {
    /// Amount in minor units
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub narration: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub asset: EarningAsset,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EarningAsset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, alias = "salePrice")]
    pub sale_price: Option<f64>,

    #[serde(default, alias = "quantitySold")]
    pub quantity_sold: Option<f64>,
}
