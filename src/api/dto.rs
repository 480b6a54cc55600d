//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::dashboard::SliceStatus;
use crate::provider::{Asset, Earning};
use crate::store::LinkedAccount;

// ============================================
// LINK DTOs
// ============================================

/// Code handed over by the Connect widget
#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    pub code: String,
}

/// Refresh response; `refreshed` is false when no account is active
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub refreshed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<crate::dashboard::RefreshReport>,
}

// ============================================
// PORTFOLIO DTOs
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsResponse {
    /// `null` until the first successful fetch
    pub assets: Option<Vec<Asset>>,
    pub total_purchase_amount: f64,
    pub last_fetch: SliceStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsResponse {
    pub earnings: Option<Vec<Earning>>,
    pub total_earnings: f64,
    pub last_fetch: SliceStatus,
}

// ============================================
// ACCOUNT DTOs
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountListResponse {
    pub active_account_id: Option<String>,
    pub total: usize,
    pub accounts: Vec<LinkedAccount>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Store status
    pub store: String,
    /// Whether a provider secret key is configured
    pub provider_configured: bool,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
