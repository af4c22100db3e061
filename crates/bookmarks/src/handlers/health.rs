//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - liveness, no checks
//! - `/healthz` - pings the relational store and the stats store

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub storage: CheckResult,
    pub stats: CheckResult,
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<E: std::fmt::Display> From<Result<(), E>> for CheckResult {
    fn from(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self {
                ok: true,
                error: None,
            },
            Err(e) => Self {
                ok: false,
                error: Some(e.to_string()),
            },
        }
    }
}

/// GET /livez - Returns 200 as soon as the server accepts connections.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - 200 when both stores answer, 503 otherwise.
pub async fn healthz(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let storage: CheckResult = state.images.count_images().await.map(|_| ()).into();
    let stats: CheckResult = state.stats.ping().await.into();

    let healthy = storage.ok && stats.ok;
    if !healthy {
        tracing::warn!(
            storage_error = ?storage.error,
            stats_error = ?stats.error,
            "health check failed"
        );
    }

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthStatus {
            healthy,
            storage,
            stats,
        }),
    )
}
