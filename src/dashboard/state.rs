//! Dashboard view state and fetch results

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::portfolio::Totals;
use crate::provider::{Asset, Earning};
use crate::store::LinkedAccount;

/// What the page renders: raw collections plus their totals
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    /// `None` until the first successful fetch
    pub assets: Option<Vec<Asset>>,
    pub earnings: Option<Vec<Earning>>,
    pub total_purchase_amount: f64,
    pub total_earnings: f64,
    pub assets_status: SliceStatus,
    pub earnings_status: SliceStatus,
}

impl DashboardState {
    pub fn totals(&self) -> Totals {
        Totals {
            total_purchase_amount: self.total_purchase_amount,
            total_earnings: self.total_earnings,
        }
    }
}

/// Last fetch attempt for one slice of the state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SliceStatus {
    #[default]
    NotFetched,
    Loaded {
        at: DateTime<Utc>,
    },
    Failed {
        at: DateTime<Utc>,
        reason: String,
    },
}

/// `success(data) | failure(reason)` for a single fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "camelCase")]
pub enum FetchOutcome<T> {
    Success(T),
    Failure(String),
}

impl<T> FetchOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }
}

/// Size and total of a fetched collection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CollectionSummary {
    pub count: usize,
    pub total: f64,
}

/// Outcome of linking one account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkReport {
    pub account_id: String,
    pub assets: FetchOutcome<CollectionSummary>,
    pub earnings: FetchOutcome<CollectionSummary>,
    pub account: FetchOutcome<LinkedAccount>,
}

/// Outcome of re-fetching the active account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReport {
    pub account_id: String,
    pub assets: FetchOutcome<CollectionSummary>,
    pub earnings: FetchOutcome<CollectionSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fetch_outcome_json() {
        let ok: FetchOutcome<CollectionSummary> = FetchOutcome::Success(CollectionSummary {
            count: 2,
            total: 250.0,
        });
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"status": "success", "data": {"count": 2, "total": 250.0}})
        );

        let failed: FetchOutcome<CollectionSummary> = FetchOutcome::Failure("timeout".into());
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"status": "failure", "data": "timeout"})
        );
    }

    #[test]
    fn test_slice_status_json() {
        assert_eq!(
            serde_json::to_value(SliceStatus::NotFetched).unwrap(),
            json!({"state": "notFetched"})
        );
    }
}
