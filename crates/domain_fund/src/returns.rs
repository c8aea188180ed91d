//! Trailing return periods and their presentation helpers

use serde::{Deserialize, Serialize};
use std::fmt;

/// A trailing window over which a percentage return is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReturnPeriod {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "3y")]
    ThreeYears,
    #[serde(rename = "5y")]
    FiveYears,
}

impl ReturnPeriod {
    /// Every period, shortest first (the table's column order)
    pub const ALL: [ReturnPeriod; 8] = [
        ReturnPeriod::OneDay,
        ReturnPeriod::OneWeek,
        ReturnPeriod::OneMonth,
        ReturnPeriod::ThreeMonths,
        ReturnPeriod::SixMonths,
        ReturnPeriod::OneYear,
        ReturnPeriod::ThreeYears,
        ReturnPeriod::FiveYears,
    ];

    /// Short code, also the key used in a record's `dates` map
    pub fn code(&self) -> &'static str {
        match self {
            ReturnPeriod::OneDay => "1d",
            ReturnPeriod::OneWeek => "1w",
            ReturnPeriod::OneMonth => "1m",
            ReturnPeriod::ThreeMonths => "3m",
            ReturnPeriod::SixMonths => "6m",
            ReturnPeriod::OneYear => "1y",
            ReturnPeriod::ThreeYears => "3y",
            ReturnPeriod::FiveYears => "5y",
        }
    }

    /// Name of the record attribute holding this period's return
    pub fn field_name(&self) -> &'static str {
        match self {
            ReturnPeriod::OneDay => "returns1d",
            ReturnPeriod::OneWeek => "returns1w",
            ReturnPeriod::OneMonth => "returns1m",
            ReturnPeriod::ThreeMonths => "returns3m",
            ReturnPeriod::SixMonths => "returns6m",
            ReturnPeriod::OneYear => "returns1y",
            ReturnPeriod::ThreeYears => "returns3y",
            ReturnPeriod::FiveYears => "returns5y",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ReturnPeriod::OneDay => "1 Day",
            ReturnPeriod::OneWeek => "1 Week",
            ReturnPeriod::OneMonth => "1 Month",
            ReturnPeriod::ThreeMonths => "3 Months",
            ReturnPeriod::SixMonths => "6 Months",
            ReturnPeriod::OneYear => "1 Year",
            ReturnPeriod::ThreeYears => "3 Years",
            ReturnPeriod::FiveYears => "5 Years",
        }
    }

    /// The investment horizon this period belongs to
    pub fn horizon(&self) -> Horizon {
        match self {
            ReturnPeriod::OneDay | ReturnPeriod::OneWeek | ReturnPeriod::OneMonth => {
                Horizon::ShortTerm
            }
            ReturnPeriod::ThreeMonths | ReturnPeriod::SixMonths | ReturnPeriod::OneYear => {
                Horizon::MediumTerm
            }
            ReturnPeriod::ThreeYears | ReturnPeriod::FiveYears => Horizon::LongTerm,
        }
    }

    /// Looks a period up by its code, ignoring ASCII case
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for ReturnPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Grouping of periods into the dashboard's column tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::ShortTerm, Horizon::MediumTerm, Horizon::LongTerm];

    /// Periods shown under this horizon, shortest first
    pub fn periods(&self) -> Vec<ReturnPeriod> {
        ReturnPeriod::ALL
            .into_iter()
            .filter(|p| p.horizon() == *self)
            .collect()
    }
}

/// Direction of a return value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnTrend {
    Gain,
    Loss,
    Flat,
}

impl ReturnTrend {
    /// Classifies a percentage return
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            ReturnTrend::Gain
        } else if value < 0.0 {
            ReturnTrend::Loss
        } else {
            ReturnTrend::Flat
        }
    }
}

/// Formats a percentage with two decimals and an explicit `+` for gains
pub fn format_return(value: f64) -> String {
    match ReturnTrend::of(value) {
        ReturnTrend::Gain => format!("+{:.2}%", value),
        _ => format!("{:.2}%", value),
    }
}
