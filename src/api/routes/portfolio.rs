//! Portfolio Routes
//!
//! Read-only views of the dashboard state.
//!
//! - GET /api/v1/assets - Raw assets, purchase total, last fetch status
//! - GET /api/v1/earnings - Raw earnings, earnings total, last fetch status
//! - GET /api/v1/totals - Both totals

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{AssetsResponse, EarningsResponse};
use crate::api::state::AppState;
use crate::portfolio::Totals;

/// GET /api/v1/assets
pub async fn get_assets(State(state): State<Arc<AppState>>) -> Json<AssetsResponse> {
    let view = state.dashboard.snapshot().await;

    Json(AssetsResponse {
        assets: view.assets,
        total_purchase_amount: view.total_purchase_amount,
        last_fetch: view.assets_status,
    })
}

/// GET /api/v1/earnings
pub async fn get_earnings(State(state): State<Arc<AppState>>) -> Json<EarningsResponse> {
    let view = state.dashboard.snapshot().await;

    Json(EarningsResponse {
        earnings: view.earnings,
        total_earnings: view.total_earnings,
        last_fetch: view.earnings_status,
    })
}

/// GET /api/v1/totals
pub async fn get_totals(State(state): State<Arc<AppState>>) -> Json<Totals> {
    Json(state.dashboard.snapshot().await.totals())
}
