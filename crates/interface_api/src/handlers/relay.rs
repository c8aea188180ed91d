//! Relay handlers
//!
//! Pass-through to the configured fund source with no fallback. Any failure
//! becomes a 500 with a bare `{ "error": ... }` body.

use std::future::Future;

use axum::{extract::State, Json};
use tracing::error;

use core_kernel::PortError;
use domain_fund::{FundsPayload, RefreshAck};

use crate::{error::ApiError, AppState};

/// `GET /api/funds`
pub async fn get_funds(State(state): State<AppState>) -> Result<Json<FundsPayload>, ApiError> {
    match bounded(&state, "fetch_funds", state.relay.fetch_funds()).await {
        Ok(funds) => Ok(Json(FundsPayload { funds })),
        Err(err) => {
            error!(source = state.relay.name(), error = %err, "Error fetching funds from upstream");
            Err(ApiError::Relay("Failed to fetch mutual fund data".to_string()))
        }
    }
}

/// `POST /api/refresh`
pub async fn refresh(State(state): State<AppState>) -> Result<Json<RefreshAck>, ApiError> {
    match bounded(&state, "trigger_refresh", state.relay.trigger_refresh()).await {
        Ok(ack) => Ok(Json(ack)),
        Err(err) => {
            error!(source = state.relay.name(), error = %err, "Error refreshing upstream data");
            Err(ApiError::Relay("Failed to refresh mutual fund data".to_string()))
        }
    }
}

async fn bounded<T>(
    state: &AppState,
    operation: &str,
    call: impl Future<Output = Result<T, PortError>>,
) -> Result<T, PortError> {
    let limit = state.config.upstream_timeout();
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| PortError::timeout(operation, limit.as_millis() as u64))?
}
