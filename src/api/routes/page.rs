//! Page Route
//!
//! - GET / - The dashboard page

use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::view::{render_page, PageContext};

/// GET /
pub async fn dashboard_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let view = state.dashboard.snapshot().await;
    let linked_accounts = state.dashboard.store().linked_accounts().await;

    Html(render_page(&PageContext {
        public_key: &state.config.public_key,
        state: &view,
        linked_accounts: &linked_accounts,
    }))
}
