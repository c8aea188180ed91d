//! Fund DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use domain_fund::view::ALL;
use domain_fund::{
    format_return, DataOrigin, FundError, FundRecord, FundSummary, Horizon, RefreshAck,
    ReturnPeriod, ReturnTrend, RiskLevel, Selection, ViewState,
};

/// Query string of the table endpoints
///
/// `?search=&category=&risk=&sort=&order=`, all optional. `category` and
/// `risk` accept `all`.
#[derive(Debug, Default, Deserialize)]
pub struct FundQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub risk: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl FundQuery {
    pub fn to_view_state(&self) -> Result<ViewState, FundError> {
        let mut state = ViewState::default();

        if let Some(search) = &self.search {
            state.search_term = search.clone();
        }
        if let Some(category) = &self.category {
            state.selected_category = if category == ALL {
                Selection::All
            } else {
                Selection::Only(category.clone())
            };
        }
        if let Some(risk) = &self.risk {
            state.selected_risk = risk.parse()?;
        }
        if let Some(sort) = &self.sort {
            state.sort_key = sort.parse()?;
        }
        if let Some(order) = &self.order {
            state.sort_order = order.parse()?;
        }

        Ok(state)
    }
}

#[derive(Debug, Serialize)]
pub struct FundListResponse {
    pub funds: Vec<FundRecord>,
    /// Rows after filtering
    pub count: usize,
    /// Records before filtering
    pub total: usize,
    pub origin: DataOrigin,
    pub view: ViewState,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: FundSummary,
    pub origin: DataOrigin,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
    pub risk_levels: Vec<RiskLevel>,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// Acknowledgment from the source, passed through
    pub refresh: RefreshAck,
    pub count: usize,
    pub origin: DataOrigin,
}

/// One period's return as shown in the fund details view
#[derive(Debug, Serialize)]
pub struct PeriodReturn {
    pub period: ReturnPeriod,
    pub label: &'static str,
    pub value: f64,
    pub formatted: String,
    pub trend: ReturnTrend,
    /// Date the return was computed against, when the source supplies it
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct HorizonReturns {
    pub horizon: Horizon,
    pub returns: Vec<PeriodReturn>,
}

#[derive(Debug, Serialize)]
pub struct FundDetailResponse {
    pub fund: FundRecord,
    pub fund_house: String,
    pub valuation_date: Option<NaiveDate>,
    pub horizons: Vec<HorizonReturns>,
    pub origin: DataOrigin,
}

impl FundDetailResponse {
    pub fn new(fund: FundRecord, origin: DataOrigin) -> Self {
        let horizons = Horizon::ALL
            .into_iter()
            .map(|horizon| HorizonReturns {
                horizon,
                returns: horizon
                    .periods()
                    .into_iter()
                    .map(|period| {
                        let value = fund.return_for(period);
                        PeriodReturn {
                            period,
                            label: period.label(),
                            value,
                            formatted: format_return(value),
                            trend: ReturnTrend::of(value),
                            as_of: fund.period_date(period),
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            fund_house: fund.fund_house().to_string(),
            valuation_date: fund.valuation_date(),
            horizons,
            fund,
            origin,
        }
    }
}
