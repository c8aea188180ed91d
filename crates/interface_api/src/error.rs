//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::PortError;
use domain_fund::FundError;
use domain_notes::NoteError;
use infra_store::StoreError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The upstream service failed behind a dashboard operation
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// A relay call failed; rendered as a bare `{ "error": ... }` body
    #[error("Relay error: {0}")]
    Relay(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

/// Relay failure body, matching what relay clients expect
#[derive(Debug, Serialize)]
pub struct RelayErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::Relay(error) => {
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(RelayErrorResponse { error }))
                    .into_response();
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg)
            }
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "upstream_error", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<FundError> for ApiError {
    fn from(err: FundError) -> Self {
        match err {
            FundError::UnknownSortKey(_)
            | FundError::UnknownSortOrder(_)
            | FundError::UnknownRiskLevel(_) => ApiError::BadRequest(err.to_string()),
            FundError::NothingToExport
            | FundError::InvalidRecord(_)
            | FundError::InvalidInvestment(_) => ApiError::Validation(err.to_string()),
        }
    }
}

impl From<NoteError> for ApiError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::EmptyContent => ApiError::Validation(err.to_string()),
            NoteError::NotFound(_) => ApiError::NotFound(err.to_string()),
        }
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

/// Failures while assembling the application state
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to build upstream client: {0}")]
    Upstream(#[source] PortError),

    #[error("Failed to open notes storage: {0}")]
    Storage(#[from] StoreError),
}
