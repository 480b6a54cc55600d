//! Mono Provider
//!
//! Everything that talks to the Mono REST API lives here. The rest of the
//! crate only sees the [`Provider`] trait, so the dashboard can be driven by
//! the real HTTP client or an in-memory stand-in.
//!
//! ## Endpoints used
//!
//! - `POST /account/auth` - exchange a Connect widget code for an account id
//! - `GET /accounts/{id}` - account name and institution
//! - `GET /accounts/{id}/assets` - investment positions
//! - `GET /accounts/{id}/earnings` - realised earnings

mod client;
mod models;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{MonoClient, MonoConfig, ProviderError, SECRET_KEY_HEADER};
pub use models::{AccountDetails, AccountId, Asset, Earning, EarningAsset, Institution};

use async_trait::async_trait;

/// Source of linked-account data
#[async_trait]
pub trait Provider: Send + Sync {
    /// Exchange the one-time widget code for an account identifier
    async fn exchange_code(&self, code: &str) -> Result<AccountId, ProviderError>;

    /// Fetch the display details of an account
    async fn account_info(&self, id: &AccountId) -> Result<AccountDetails, ProviderError>;

    /// Fetch every asset held in an account
    async fn assets(&self, id: &AccountId) -> Result<Vec<Asset>, ProviderError>;

    /// Fetch every earning recorded on an account
    async fn earnings(&self, id: &AccountId) -> Result<Vec<Earning>, ProviderError>;
}
