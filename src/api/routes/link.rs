//! Link Routes
//!
//! - POST /api/v1/link - Exchange a Connect widget code and load the account
//! - POST /api/v1/refresh - Re-fetch assets and earnings for the active account

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{LinkRequest, RefreshResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dashboard::LinkReport;

/// POST /api/v1/link
///
/// Fails only when the code exchange (or persisting the id) fails; individual
/// fetch failures are reported inside the body.
pub async fn link_account(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LinkRequest>,
) -> ApiResult<Json<LinkReport>> {
    let report = state.dashboard.link(&req.code).await?;
    Ok(Json(report))
}

/// POST /api/v1/refresh
pub async fn refresh(State(state): State<Arc<AppState>>) -> Json<RefreshResponse> {
    let report = state.dashboard.refresh().await;

    Json(RefreshResponse {
        refreshed: report.is_some(),
        report,
    })
}
