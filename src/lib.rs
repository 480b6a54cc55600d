//! # Investy
//!
//! A dashboard for investment accounts linked through Mono Connect, served
//! by a small backend proxy that keeps the Mono secret key off the browser.
//!
//! ## Features
//!
//! - **Account linking**: exchange Connect widget codes for account ids
//! - **Assets and earnings**: fetched from Mono, totalled server-side
//! - **Persistence**: active account and linked-accounts list in a JSON store
//! - **Dashboard**: server-rendered page with Assets / Earnings / Total tabs
//!
//! ## Modules
//!
//! - [`provider`]: Mono REST client behind the [`Provider`] trait
//! - [`portfolio`]: purchase amounts and totals
//! - [`store`]: persisted account state
//! - [`dashboard`]: linking workflow and view state
//! - [`view`]: HTML rendering
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use investy::{Dashboard, MonoClient, MonoConfig, Store};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = Arc::new(MonoClient::new(MonoConfig {
//!         secret_key: "test_sk_...".to_string(),
//!         ..Default::default()
//!     })?);
//!     let store = Arc::new(Store::open("investy_data/store.json").await?);
//!     let dashboard = Dashboard::new(provider, store);
//!
//!     // Code handed over by the Connect widget
//!     let report = dashboard.link("code_from_widget").await?;
//!     println!("Linked {}", report.account_id);
//!
//!     let state = dashboard.snapshot().await;
//!     println!("Total purchase amount: USD {}", state.total_purchase_amount);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod portfolio;
pub mod provider;
pub mod store;
pub mod view;

// Re-export top-level types for convenience
pub use provider::{
    AccountDetails, AccountId, Asset, Earning, EarningAsset, Institution, MonoClient, MonoConfig,
    Provider, ProviderError,
};

pub use portfolio::{purchase_amount, total_earnings, total_purchase_amount, Totals};

pub use store::{LinkedAccount, Store, StoreError, StoreResult, StoreState, Unlinked};

pub use dashboard::{
    CollectionSummary, Dashboard, DashboardError, DashboardResult, DashboardState, FetchOutcome,
    LinkReport, RefreshReport, SliceStatus,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig, ProviderSettings, ServerConfig, StoreSettings};
