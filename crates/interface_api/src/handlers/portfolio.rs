//! Portfolio handlers
//!
//! Holdings live in memory for the lifetime of the process and are marked to
//! the NAVs of whatever record set the fund data service currently serves.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use tracing::{debug, info};

use core_kernel::InvestmentId;
use domain_fund::{FundRecord, Investment, Portfolio};

use crate::dto::portfolio::{InvestmentRequest, PortfolioResponse};
use crate::{error::ApiError, AppState};

/// `GET /portfolio`, holdings revalued at current NAVs
pub async fn get_portfolio(
    State(state): State<AppState>,
) -> Result<Json<PortfolioResponse>, ApiError> {
    let load = state.funds.load_funds().await;
    let mut portfolio = state.portfolio.lock().await;

    revalue(&mut portfolio, &load.funds)?;

    Ok(Json(PortfolioResponse {
        investments: portfolio.investments().to_vec(),
        summary: portfolio.summary(),
    }))
}

/// `POST /portfolio`
pub async fn add_investment(
    State(state): State<AppState>,
    Json(request): Json<InvestmentRequest>,
) -> Result<(StatusCode, Json<Investment>), ApiError> {
    let load = state.funds.load_funds().await;

    let fund = load
        .funds
        .iter()
        .find(|f| f.id.as_str() == request.fund_id)
        .ok_or_else(|| ApiError::NotFound(format!("Fund {} not found", request.fund_id)))?;

    let investment = Investment::purchase(
        fund.id.clone(),
        &fund.name,
        &fund.category,
        request.amount,
        nav_of(fund)?,
    )?;

    info!(
        investment_id = %investment.id,
        fund_id = %fund.id,
        fund = %fund.name,
        amount = %investment.amount,
        units = %investment.units,
        "Investment added"
    );

    state.portfolio.lock().await.add(investment.clone());
    Ok((StatusCode::CREATED, Json(investment)))
}

/// `DELETE /portfolio/:id`
pub async fn remove_investment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let investment_id: InvestmentId = id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid investment id: {}", id)))?;

    state
        .portfolio
        .lock()
        .await
        .remove(investment_id)
        .ok_or_else(|| ApiError::NotFound(format!("Investment {} not found", id)))?;

    info!(%investment_id, "Investment removed");
    Ok(StatusCode::NO_CONTENT)
}

fn revalue(portfolio: &mut Portfolio, funds: &[FundRecord]) -> Result<(), ApiError> {
    for fund in funds {
        let updated = portfolio.revalue_fund(&fund.id, nav_of(fund)?);
        if updated > 0 {
            debug!(fund_id = %fund.id, updated, "Holdings revalued");
        }
    }
    Ok(())
}

fn nav_of(fund: &FundRecord) -> Result<Decimal, ApiError> {
    Decimal::try_from(fund.nav)
        .map(|nav| nav.round_dp(4).normalize())
        .map_err(|e| {
            ApiError::Internal(format!(
                "NAV {} of fund {} is not representable: {}",
                fund.nav, fund.id, e
            ))
        })
}
