//! Dashboard handlers
//!
//! Built on the fund data service, so these never fail for lack of upstream
//! data: each response carries the origin of the records it was derived from.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use domain_fund::{
    available_categories, derive_summary, derive_view, CsvExport, RiskLevel,
};

use crate::dto::fund::*;
use crate::{error::ApiError, AppState};

/// `GET /dashboard/funds`
pub async fn list_funds(
    State(state): State<AppState>,
    Query(query): Query<FundQuery>,
) -> Result<Json<FundListResponse>, ApiError> {
    let view = query.to_view_state()?;
    let load = state.funds.load_funds().await;

    let funds = derive_view(&load.funds, &view);

    Ok(Json(FundListResponse {
        count: funds.len(),
        total: load.funds.len(),
        funds,
        origin: load.origin,
        view,
    }))
}

/// `GET /dashboard/funds/:id`
pub async fn get_fund(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FundDetailResponse>, ApiError> {
    let load = state.funds.load_funds().await;

    let fund = load
        .funds
        .into_iter()
        .find(|f| f.id.as_str() == id)
        .ok_or_else(|| ApiError::NotFound(format!("Fund {} not found", id)))?;

    Ok(Json(FundDetailResponse::new(fund, load.origin)))
}

/// `GET /dashboard/summary`, over the full record set
pub async fn summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let load = state.funds.load_funds().await;

    Json(SummaryResponse {
        summary: derive_summary(&load.funds),
        origin: load.origin,
    })
}

/// `GET /dashboard/categories`
pub async fn categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let load = state.funds.load_funds().await;

    Json(CategoriesResponse {
        categories: available_categories(&load.funds),
        risk_levels: RiskLevel::ALL.to_vec(),
    })
}

/// `GET /dashboard/export`, the current view as a CSV attachment
pub async fn export(
    State(state): State<AppState>,
    Query(query): Query<FundQuery>,
) -> Result<Response, ApiError> {
    let view = query.to_view_state()?;
    let load = state.funds.load_funds().await;
    let rows = derive_view(&load.funds, &view);

    let export = CsvExport::build(&rows, state.clock.now().date_naive())?;
    info!(rows = rows.len(), filename = %export.filename, "Exporting fund table");

    let disposition = format!("attachment; filename=\"{}\"", export.filename);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv;charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response())
}

/// `POST /dashboard/refresh`: asks the source to recompute, then reloads
pub async fn refresh(State(state): State<AppState>) -> Result<Json<RefreshResponse>, ApiError> {
    let ack = state.funds.refresh_funds().await?;
    let load = state.funds.load_funds().await;

    Ok(Json(RefreshResponse {
        refresh: ack,
        count: load.funds.len(),
        origin: load.origin,
    }))
}
