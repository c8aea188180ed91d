//! Fund record definition
//!
//! A [`FundRecord`] is one fund's latest valuation and trailing returns as
//! delivered by the data source. Records are never mutated after they are
//! loaded; a refresh replaces the whole set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use core_kernel::FundId;

use crate::dates::parse_period_date;
use crate::error::FundError;
use crate::returns::ReturnPeriod;

/// Risk tier classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = FundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RiskLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| FundError::UnknownRiskLevel(s.to_string()))
    }
}

/// One fund's NAV and trailing returns snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundRecord {
    /// Stable identifier assigned by the data source
    pub id: FundId,
    /// Display name
    pub name: String,
    /// Net asset value per unit
    pub nav: f64,
    #[serde(rename = "returns1d")]
    pub returns_1d: f64,
    #[serde(rename = "returns1w")]
    pub returns_1w: f64,
    #[serde(rename = "returns1m")]
    pub returns_1m: f64,
    #[serde(rename = "returns3m")]
    pub returns_3m: f64,
    #[serde(rename = "returns6m")]
    pub returns_6m: f64,
    #[serde(rename = "returns1y")]
    pub returns_1y: f64,
    #[serde(rename = "returns3y")]
    pub returns_3y: f64,
    #[serde(rename = "returns5y")]
    pub returns_5y: f64,
    /// Fund category, e.g. "Large Cap"
    pub category: String,
    /// Risk tier
    pub risk: RiskLevel,
    /// Period code -> `DD-MM-YYYY` date each return was computed against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<BTreeMap<String, String>>,
    /// `DD-MM-YYYY` valuation date of `nav`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_date: Option<String>,
}

impl FundRecord {
    /// Creates a record with all returns at zero
    pub fn new(
        id: impl Into<FundId>,
        name: impl Into<String>,
        nav: f64,
        category: impl Into<String>,
        risk: RiskLevel,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            nav,
            returns_1d: 0.0,
            returns_1w: 0.0,
            returns_1m: 0.0,
            returns_3m: 0.0,
            returns_6m: 0.0,
            returns_1y: 0.0,
            returns_3y: 0.0,
            returns_5y: 0.0,
            category: category.into(),
            risk,
            dates: None,
            current_date: None,
        }
    }

    /// Sets all eight returns, shortest period first
    pub fn with_returns(mut self, returns: [f64; 8]) -> Self {
        for (period, value) in ReturnPeriod::ALL.into_iter().zip(returns) {
            *self.return_mut(period) = value;
        }
        self
    }

    /// Sets the valuation date of the NAV
    pub fn with_current_date(mut self, date: impl Into<String>) -> Self {
        self.current_date = Some(date.into());
        self
    }

    /// Records the date a period's return was computed against
    pub fn with_period_date(mut self, period: ReturnPeriod, date: impl Into<String>) -> Self {
        self.dates
            .get_or_insert_with(BTreeMap::new)
            .insert(period.code().to_string(), date.into());
        self
    }

    /// Returns the percentage return for a period
    pub fn return_for(&self, period: ReturnPeriod) -> f64 {
        match period {
            ReturnPeriod::OneDay => self.returns_1d,
            ReturnPeriod::OneWeek => self.returns_1w,
            ReturnPeriod::OneMonth => self.returns_1m,
            ReturnPeriod::ThreeMonths => self.returns_3m,
            ReturnPeriod::SixMonths => self.returns_6m,
            ReturnPeriod::OneYear => self.returns_1y,
            ReturnPeriod::ThreeYears => self.returns_3y,
            ReturnPeriod::FiveYears => self.returns_5y,
        }
    }

    fn return_mut(&mut self, period: ReturnPeriod) -> &mut f64 {
        match period {
            ReturnPeriod::OneDay => &mut self.returns_1d,
            ReturnPeriod::OneWeek => &mut self.returns_1w,
            ReturnPeriod::OneMonth => &mut self.returns_1m,
            ReturnPeriod::ThreeMonths => &mut self.returns_3m,
            ReturnPeriod::SixMonths => &mut self.returns_6m,
            ReturnPeriod::OneYear => &mut self.returns_1y,
            ReturnPeriod::ThreeYears => &mut self.returns_3y,
            ReturnPeriod::FiveYears => &mut self.returns_5y,
        }
    }

    /// Parsed date a period's return was computed against
    ///
    /// `None` when the record carries no dates, the period is missing, or the
    /// stored value is not a valid `DD-MM-YYYY` date.
    pub fn period_date(&self, period: ReturnPeriod) -> Option<NaiveDate> {
        let dates = self.dates.as_ref()?;
        let raw = dates.get(period.code()).or_else(|| {
            dates
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(period.code()))
                .map(|(_, value)| value)
        })?;
        parse_period_date(raw)
    }

    /// Parsed valuation date of the NAV
    pub fn valuation_date(&self) -> Option<NaiveDate> {
        self.current_date.as_deref().and_then(parse_period_date)
    }

    /// The fund house, taken as the first word of the name
    pub fn fund_house(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    /// Checks the record invariants: finite numbers and a non-negative NAV
    pub fn validate(&self) -> Result<(), FundError> {
        if !self.nav.is_finite() || self.nav < 0.0 {
            return Err(FundError::InvalidRecord(format!(
                "fund {} has invalid NAV {}",
                self.id, self.nav
            )));
        }
        if let Some(period) = ReturnPeriod::ALL
            .into_iter()
            .find(|p| !self.return_for(*p).is_finite())
        {
            return Err(FundError::InvalidRecord(format!(
                "fund {} has non-numeric {}",
                self.id,
                period.field_name()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis() -> FundRecord {
        FundRecord::new("1", "Axis Bluechip Fund", 45.23, "Large Cap", RiskLevel::Medium)
            .with_returns([0.5, 1.2, 3.4, 8.2, 12.5, 18.3, 14.2, 16.8])
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(axis()).unwrap();
        assert_eq!(json["returns1y"], 18.3);
        assert_eq!(json["risk"], "Medium");
        assert!(json.get("dates").is_none());
    }

    #[test]
    fn test_missing_return_field_is_rejected() {
        let json = r#"{"id":"1","name":"X","nav":1.0,"returns1d":0,"returns1w":0,
            "returns1m":0,"returns3m":0,"returns6m":0,"returns1y":0,"returns3y":0,
            "category":"Debt","risk":"Low"}"#;
        assert!(serde_json::from_str::<FundRecord>(json).is_err());
    }

    #[test]
    fn test_period_date() {
        let fund = axis().with_period_date(ReturnPeriod::OneYear, "05-03-2023");
        assert_eq!(
            fund.period_date(ReturnPeriod::OneYear),
            NaiveDate::from_ymd_opt(2023, 3, 5)
        );
        assert_eq!(fund.period_date(ReturnPeriod::OneDay), None);
    }

    #[test]
    fn test_fund_house() {
        assert_eq!(axis().fund_house(), "Axis");
    }

    #[test]
    fn test_validate_rejects_negative_nav() {
        let mut fund = axis();
        fund.nav = -1.0;
        assert!(fund.validate().is_err());
        assert!(axis().validate().is_ok());
    }

    #[test]
    fn test_risk_level_from_str() {
        assert_eq!("High".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert!("high".parse::<RiskLevel>().is_err());
    }
}
