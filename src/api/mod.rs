//! Investy HTTP API
//!
//! The backend proxy in front of Mono, built with Axum. The browser only
//! ever talks to these routes; the secret key stays in the provider client.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Dashboard page
//!
//! ## Linking
//! - `POST /api/v1/link` - Exchange a Connect code and load the account
//! - `POST /api/v1/refresh` - Re-fetch assets and earnings
//!
//! ## Portfolio
//! - `GET /api/v1/assets` - Assets and purchase total
//! - `GET /api/v1/earnings` - Earnings and earnings total
//! - `GET /api/v1/totals` - Both totals
//!
//! ## Accounts
//! - `GET /api/v1/accounts` - Linked accounts
//! - `DELETE /api/v1/accounts/:id` - Unlink an account
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use investy::api::{serve, ApiConfig, AppState};
//! use investy::dashboard::Dashboard;
//! use investy::provider::{MonoClient, MonoConfig};
//! use investy::store::Store;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = Arc::new(MonoClient::new(MonoConfig::default())?);
//!     let store = Arc::new(Store::open("investy_data/store.json").await?);
//!     let dashboard = Arc::new(Dashboard::new(provider, store));
//!     let config = ApiConfig::default();
//!
//!     serve(AppState::new(dashboard, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Linking routes
        .route("/link", post(routes::link::link_account))
        .route("/refresh", post(routes::link::refresh))
        // Portfolio routes
        .route("/assets", get(routes::portfolio::get_assets))
        .route("/earnings", get(routes::portfolio::get_earnings))
        .route("/totals", get(routes::portfolio::get_totals))
        // Account routes
        .route("/accounts", get(routes::accounts::list_accounts))
        .route("/accounts/:id", delete(routes::accounts::unlink_account));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    // Page and API share an origin
    Router::new()
        .route("/", get(routes::page::dashboard_page))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Investy listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Investy shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
