//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use domain_fund::{FundRecord, ReturnPeriod, RiskLevel};

/// Builder for constructing fund records
pub struct FundRecordBuilder {
    record: FundRecord,
}

impl Default for FundRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FundRecordBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            record: FundRecord::new("test-fund", "Test Equity Fund", 100.0, "Large Cap", RiskLevel::Medium),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.record.id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.record.name = name.into();
        self
    }

    pub fn with_nav(mut self, nav: f64) -> Self {
        self.record.nav = nav;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.record.category = category.into();
        self
    }

    pub fn with_risk(mut self, risk: RiskLevel) -> Self {
        self.record.risk = risk;
        self
    }

    /// Sets a single period's return, leaving the others untouched
    pub fn with_return(mut self, period: ReturnPeriod, value: f64) -> Self {
        let mut returns = ReturnPeriod::ALL.map(|p| self.record.return_for(p));
        if let Some(index) = ReturnPeriod::ALL.iter().position(|p| *p == period) {
            returns[index] = value;
        }
        self.record = self.record.with_returns(returns);
        self
    }

    pub fn with_returns(mut self, returns: [f64; 8]) -> Self {
        self.record = self.record.with_returns(returns);
        self
    }

    pub fn with_current_date(mut self, date: &str) -> Self {
        self.record = self.record.with_current_date(date);
        self
    }

    pub fn with_period_date(mut self, period: ReturnPeriod, date: &str) -> Self {
        self.record = self.record.with_period_date(period, date);
        self
    }

    /// Builds the record
    pub fn build(self) -> FundRecord {
        self.record
    }
}
