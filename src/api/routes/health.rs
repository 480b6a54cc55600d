//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::path::Path;
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Ready once a secret key is configured; without it every provider call fails.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if state.config.provider_configured {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let store_ok = check_store_health(&state).await;
    let provider_configured = state.config.provider_configured;

    let status = if store_ok && provider_configured {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        store: if store_ok { "ok" } else { "error" }.to_string(),
        provider_configured,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// The store directory, or the nearest ancestor that will hold it, must be a
/// writable directory for links to persist. Nothing is created here.
async fn check_store_health(state: &AppState) -> bool {
    match state.dashboard.store().path().and_then(|p| p.parent()) {
        Some(dir) if !dir.as_os_str().is_empty() => dir_writable(dir).await,
        _ => true,
    }
}

async fn dir_writable(dir: &Path) -> bool {
    for candidate in dir.ancestors() {
        if candidate.as_os_str().is_empty() {
            break;
        }
        match tokio::fs::metadata(candidate).await {
            Ok(meta) => return meta.is_dir() && !meta.permissions().readonly(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(_) => return false,
        }
    }
    true
}
