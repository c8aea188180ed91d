//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use domain_fund::DataOrigin;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub version: String,
    pub origin: DataOrigin,
    pub funds: usize,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check (includes fund data)
///
/// Degraded data still counts as ready; only an empty, unavailable record set
/// is reported as 503.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let load = state.funds.load_funds().await;

    let (status, label) = match load.origin {
        DataOrigin::Primary => (StatusCode::OK, "ready"),
        DataOrigin::Unavailable { .. } => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
        _ => (StatusCode::OK, "degraded"),
    };

    (
        status,
        Json(ReadinessResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            funds: load.funds.len(),
            origin: load.origin,
        }),
    )
}
