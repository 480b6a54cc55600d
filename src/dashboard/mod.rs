//! Dashboard Workflow
//!
//! Links accounts and keeps the assets/earnings view state current.
//!
//! ## Linking
//!
//! 1. The widget code is exchanged for an account id
//! 2. The id is persisted as the active account
//! 3. Assets, earnings and account info are fetched concurrently
//! 4. Account info is appended to the linked-accounts list
//!
//! Each fetch reports its own [`FetchOutcome`]. A failed fetch is logged and
//! leaves the previous collection and total in place.

mod state;

pub use state::{
    CollectionSummary, DashboardState, FetchOutcome, LinkReport, RefreshReport, SliceStatus,
};

use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::portfolio::{total_earnings, total_purchase_amount};
use crate::provider::{AccountId, Provider, ProviderError};
use crate::store::{LinkedAccount, Store, StoreError, Unlinked};

/// Errors that abort a dashboard operation
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Code exchange failed: {0}")]
    Exchange(#[source] ProviderError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type DashboardResult<T> = Result<T, DashboardError>;

const INACTIVE_ACCOUNT: &str = "account no longer active";

/// Linking workflow plus the view state it feeds
pub struct Dashboard {
    provider: Arc<dyn Provider>,
    store: Arc<Store>,
    state: RwLock<DashboardState>,
}

impl Dashboard {
    pub fn new(provider: Arc<dyn Provider>, store: Arc<Store>) -> Self {
        Self {
            provider,
            store,
            state: RwLock::new(DashboardState::default()),
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Current view state
    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Link the account behind a Connect widget code
    pub async fn link(&self, code: &str) -> DashboardResult<LinkReport> {
        let id = self.provider.exchange_code(code).await.map_err(|e| {
            tracing::warn!(error = %e, "Connect code exchange failed");
            DashboardError::Exchange(e)
        })?;

        self.store.set_account_id(id.clone()).await?;
        tracing::info!(account_id = %id, "Linked account");

        let (assets, earnings, account) = tokio::join!(
            self.fetch_assets(&id),
            self.fetch_earnings(&id),
            self.fetch_account_info(&id),
        );

        Ok(LinkReport {
            account_id: id.to_string(),
            assets,
            earnings,
            account,
        })
    }

    /// Re-fetch assets and earnings for the persisted account, if any
    pub async fn refresh(&self) -> Option<RefreshReport> {
        let id = self.store.account_id().await?;

        let (assets, earnings) = tokio::join!(self.fetch_assets(&id), self.fetch_earnings(&id));

        Some(RefreshReport {
            account_id: id.to_string(),
            assets,
            earnings,
        })
    }

    /// Fetch assets and recompute the purchase total
    pub async fn fetch_assets(&self, id: &AccountId) -> FetchOutcome<CollectionSummary> {
        match self.provider.assets(id).await {
            Ok(assets) => {
                let summary = CollectionSummary {
                    count: assets.len(),
                    total: total_purchase_amount(&assets),
                };

                let published = self
                    .publish(id, "assets", |state| {
                        state.assets = Some(assets);
                        state.total_purchase_amount = summary.total;
                        state.assets_status = SliceStatus::Loaded { at: Utc::now() };
                    })
                    .await;
                if !published {
                    return FetchOutcome::Failure(INACTIVE_ACCOUNT.to_string());
                }

                tracing::debug!(account_id = %id, count = summary.count, total = summary.total, "Fetched assets");
                FetchOutcome::Success(summary)
            }
            Err(e) => {
                tracing::warn!(account_id = %id, error = %e, "Asset fetch failed");
                let reason = e.to_string();
                self.publish(id, "assets", |state| {
                    state.assets_status = SliceStatus::Failed {
                        at: Utc::now(),
                        reason: reason.clone(),
                    };
                })
                .await;
                FetchOutcome::Failure(reason)
            }
        }
    }

    /// Fetch earnings and recompute the earnings total
    pub async fn fetch_earnings(&self, id: &AccountId) -> FetchOutcome<CollectionSummary> {
        match self.provider.earnings(id).await {
            Ok(earnings) => {
                let summary = CollectionSummary {
                    count: earnings.len(),
                    total: total_earnings(&earnings),
                };

                let published = self
                    .publish(id, "earnings", |state| {
                        state.earnings = Some(earnings);
                        state.total_earnings = summary.total;
                        state.earnings_status = SliceStatus::Loaded { at: Utc::now() };
                    })
                    .await;
                if !published {
                    return FetchOutcome::Failure(INACTIVE_ACCOUNT.to_string());
                }

                tracing::debug!(account_id = %id, count = summary.count, total = summary.total, "Fetched earnings");
                FetchOutcome::Success(summary)
            }
            Err(e) => {
                tracing::warn!(account_id = %id, error = %e, "Earnings fetch failed");
                let reason = e.to_string();
                self.publish(id, "earnings", |state| {
                    state.earnings_status = SliceStatus::Failed {
                        at: Utc::now(),
                        reason: reason.clone(),
                    };
                })
                .await;
                FetchOutcome::Failure(reason)
            }
        }
    }

    /// Fetch account details and append them to the linked-accounts list
    pub async fn fetch_account_info(&self, id: &AccountId) -> FetchOutcome<LinkedAccount> {
        let details = match self.provider.account_info(id).await {
            Ok(details) => details,
            Err(e) => {
                tracing::warn!(account_id = %id, error = %e, "Account info fetch failed");
                return FetchOutcome::Failure(e.to_string());
            }
        };

        let account = LinkedAccount {
            name: details.name,
            institution_name: details.institution.name,
            account_id: id.clone(),
            linked_at: Some(Utc::now()),
        };

        // Held across the append so an unlink cannot slip in between
        let _state = self.state.write().await;
        if !self.is_active(id).await {
            tracing::debug!(account_id = %id, "Discarding account info for inactive account");
            return FetchOutcome::Failure(INACTIVE_ACCOUNT.to_string());
        }

        match self.store.append_linked_account(account.clone()).await {
            Ok(count) => {
                tracing::info!(account_id = %id, linked_accounts = count, "Recorded linked account");
                FetchOutcome::Success(account)
            }
            Err(e) => {
                tracing::error!(account_id = %id, error = %e, "Failed to persist linked account");
                FetchOutcome::Failure(e.to_string())
            }
        }
    }

    /// Remove an account from the linked list; clears the view if it was active
    pub async fn unlink(&self, id: &AccountId) -> DashboardResult<Unlinked> {
        // Lock order is always view state, then store
        let mut state = self.state.write().await;
        let result = self.store.unlink(id).await?;

        if result.was_active {
            *state = DashboardState::default();
        }
        drop(state);

        tracing::info!(
            account_id = %id,
            removed = result.removed,
            was_active = result.was_active,
            "Unlinked account"
        );
        Ok(result)
    }

    async fn is_active(&self, id: &AccountId) -> bool {
        self.store.account_id().await.as_ref() == Some(id)
    }

    /// Apply `update` under the state lock if `id` is still the active account
    async fn publish<F>(&self, id: &AccountId, slice: &str, update: F) -> bool
    where
        F: FnOnce(&mut DashboardState),
    {
        let mut state = self.state.write().await;
        if !self.is_active(id).await {
            tracing::debug!(account_id = %id, slice, "Discarding response for inactive account");
            return false;
        }

        update(&mut state);
        true
    }
}
