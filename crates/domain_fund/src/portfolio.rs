//! Personal portfolio holdings
//!
//! Tracks what the user invested in each fund and values it at the current
//! NAV. Money and units use exact decimals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{FundId, InvestmentId};

use crate::error::FundError;
use crate::{calculate_units, calculate_value};

/// A holding of units in one fund
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub id: InvestmentId,
    /// Fund the units were bought in
    pub fund_id: FundId,
    pub fund_name: String,
    pub category: String,
    /// Amount originally invested
    pub amount: Decimal,
    /// Units allotted at purchase
    pub units: Decimal,
    pub purchase_nav: Decimal,
    pub current_nav: Decimal,
    pub purchase_date: Option<NaiveDate>,
}

impl Investment {
    /// Records a purchase; units are derived from the amount and purchase NAV
    pub fn purchase(
        fund_id: impl Into<FundId>,
        fund_name: impl Into<String>,
        category: impl Into<String>,
        amount: Decimal,
        purchase_nav: Decimal,
    ) -> Result<Self, FundError> {
        if amount <= Decimal::ZERO {
            return Err(FundError::InvalidInvestment(format!(
                "amount must be positive, got {}",
                amount
            )));
        }
        if purchase_nav <= Decimal::ZERO {
            return Err(FundError::InvalidInvestment(format!(
                "purchase NAV must be positive, got {}",
                purchase_nav
            )));
        }

        Ok(Self {
            id: InvestmentId::new_v7(),
            fund_id: fund_id.into(),
            fund_name: fund_name.into(),
            category: category.into(),
            amount,
            units: calculate_units(amount, purchase_nav),
            purchase_nav,
            current_nav: purchase_nav,
            purchase_date: None,
        })
    }

    /// Overrides the allotted units (e.g. from a statement)
    pub fn with_units(mut self, units: Decimal) -> Self {
        self.units = units;
        self
    }

    pub fn with_purchase_date(mut self, date: NaiveDate) -> Self {
        self.purchase_date = Some(date);
        self
    }

    /// Marks the holding to a new NAV
    pub fn revalue(&mut self, current_nav: Decimal) {
        self.current_nav = current_nav;
    }

    /// Value of the units at the current NAV
    pub fn current_value(&self) -> Decimal {
        calculate_value(self.units, self.current_nav)
    }

    /// NAV change since purchase, in percent (2 dp)
    pub fn returns_percent(&self) -> Decimal {
        ((self.current_nav - self.purchase_nav) / self.purchase_nav * dec!(100)).round_dp(2)
    }
}

/// Totals across all holdings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_investment: Decimal,
    pub current_value: Decimal,
    /// `None` while nothing is invested
    pub total_returns_percent: Option<Decimal>,
}

/// The user's holdings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Portfolio {
    investments: Vec<Investment>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, investment: Investment) {
        self.investments.push(investment);
    }

    /// Removes a holding, returning it if it existed
    pub fn remove(&mut self, id: InvestmentId) -> Option<Investment> {
        let index = self.investments.iter().position(|i| i.id == id)?;
        Some(self.investments.remove(index))
    }

    /// Marks every holding of `fund_id` to a new NAV
    pub fn revalue_fund(&mut self, fund_id: &FundId, current_nav: Decimal) -> usize {
        let mut updated = 0;
        for investment in self.investments.iter_mut().filter(|i| &i.fund_id == fund_id) {
            investment.revalue(current_nav);
            updated += 1;
        }
        updated
    }

    pub fn investments(&self) -> &[Investment] {
        &self.investments
    }

    pub fn summary(&self) -> PortfolioSummary {
        let total_investment: Decimal = self.investments.iter().map(|i| i.amount).sum();
        let current_value: Decimal = self.investments.iter().map(Investment::current_value).sum();

        let total_returns_percent = if total_investment.is_zero() {
            None
        } else {
            Some(((current_value - total_investment) / total_investment * dec!(100)).round_dp(2))
        };

        PortfolioSummary {
            total_investment,
            current_value,
            total_returns_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis_holding() -> Investment {
        let mut investment =
            Investment::purchase("1", "Axis Bluechip Fund", "Large Cap", dec!(50000), dec!(45.23))
            .unwrap()
            .with_units(dec!(1104.97));
        investment.revalue(dec!(48.56));
        investment
    }

    #[test]
    fn test_holding_returns() {
        let investment = axis_holding();
        assert_eq!(investment.returns_percent(), dec!(7.36));
        assert_eq!(investment.current_value(), dec!(53657.34));
    }

    #[test]
    fn test_purchase_derives_units() {
        let investment = Investment::purchase("9", "X", "Debt", dec!(1000), dec!(8)).unwrap();
        assert_eq!(investment.units, dec!(125));
        assert_eq!(investment.returns_percent(), dec!(0));
    }

    #[test]
    fn test_purchase_rejects_zero_nav() {
        assert!(Investment::purchase("9", "X", "Debt", dec!(1000), Decimal::ZERO).is_err());
        assert!(Investment::purchase("9", "X", "Debt", dec!(-5), dec!(10)).is_err());
    }

    #[test]
    fn test_portfolio_summary() {
        let mut portfolio = Portfolio::new();
        portfolio.add(axis_holding());

        let summary = portfolio.summary();
        assert_eq!(summary.total_investment, dec!(50000));
        assert_eq!(summary.total_returns_percent, Some(dec!(7.31)));
    }

    #[test]
    fn test_empty_portfolio_has_no_return() {
        assert_eq!(Portfolio::new().summary().total_returns_percent, None);
    }

    #[test]
    fn test_remove_and_revalue() {
        let mut portfolio = Portfolio::new();
        let holding = axis_holding();
        let id = holding.id;
        portfolio.add(holding);

        assert_eq!(portfolio.revalue_fund(&FundId::from("1"), dec!(50)), 1);
        assert_eq!(portfolio.investments()[0].current_nav, dec!(50));
        assert!(portfolio.remove(id).is_some());
        assert!(portfolio.remove(id).is_none());
    }

    #[test]
    fn test_revalue_matches_fund_id_not_name() {
        let mut portfolio = Portfolio::new();
        portfolio.add(axis_holding());
        portfolio.add(
            Investment::purchase("7", "Axis Bluechip Fund", "Large Cap", dec!(1000), dec!(10))
                .unwrap(),
        );

        assert_eq!(portfolio.revalue_fund(&FundId::from("7"), dec!(12)), 1);
        assert_eq!(portfolio.investments()[0].current_nav, dec!(48.56));
        assert_eq!(portfolio.investments()[1].current_nav, dec!(12));
    }
}
