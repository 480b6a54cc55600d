//! Account Routes
//!
//! - GET /api/v1/accounts - Linked accounts and the active account id
//! - DELETE /api/v1/accounts/:id - Unlink an account

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::AccountListResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::provider::AccountId;
use crate::store::Unlinked;

/// GET /api/v1/accounts
pub async fn list_accounts(State(state): State<Arc<AppState>>) -> Json<AccountListResponse> {
    let snapshot = state.dashboard.store().snapshot().await;

    Json(AccountListResponse {
        active_account_id: snapshot.account_id.map(|id| id.to_string()),
        total: snapshot.linked_accounts.len(),
        accounts: snapshot.linked_accounts,
    })
}

/// DELETE /api/v1/accounts/:id
pub async fn unlink_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Unlinked>> {
    let id = AccountId::new(id);
    let result = state.dashboard.unlink(&id).await?;

    if result.removed == 0 && !result.was_active {
        return Err(ApiError::NotFound(format!("Linked account {} not found", id)));
    }

    Ok(Json(result))
}
