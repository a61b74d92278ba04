//! Liveness and readiness probe.

use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct HealthInfo {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// Active storage backend
    pub storage: String,
    /// "connected", "disconnected", or "not_applicable" for the memory store
    pub database: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Reports whether the store answers a ping.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Store reachable", body = HealthInfo),
        (status = 503, description = "Store unreachable", body = HealthInfo)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Response {
    let backend = state.store.backend();
    let uses_database = backend == crate::config::StorageBackend::Database;

    let (status, database, error) = match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            if uses_database {
                "connected"
            } else {
                "not_applicable"
            },
            None,
        ),
        Err(err) => {
            warn!(error = %err, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "disconnected", Some(err.to_string()))
        }
    };

    let info = HealthInfo {
        status: if status.is_success() {
            "healthy".to_string()
        } else {
            "unhealthy".to_string()
        },
        storage: backend.as_str().to_string(),
        database: database.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        error,
    };

    (status, Json(info)).into_response()
}
