//! Summary aggregates shown above the fund table

use chrono::NaiveDate;
use serde::Serialize;

use crate::fund::FundRecord;

/// Headline numbers for a record set
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundSummary {
    /// Number of records
    pub count: usize,
    /// Record with the highest 1Y return; first occurrence wins ties
    pub best_performer: Option<FundRecord>,
    /// Arithmetic mean of the 1Y returns
    pub average_return_1y: Option<f64>,
    /// Latest valuation date carried by any record
    pub last_updated: Option<NaiveDate>,
}

/// Derives the summary aggregates; an empty set yields no performer and no average
pub fn derive_summary(records: &[FundRecord]) -> FundSummary {
    let best_performer = records
        .iter()
        .fold(None::<&FundRecord>, |best, record| match best {
            Some(current) if record.returns_1y <= current.returns_1y => Some(current),
            _ => Some(record),
        })
        .cloned();

    let average_return_1y = if records.is_empty() {
        None
    } else {
        let total: f64 = records.iter().map(|r| r.returns_1y).sum();
        Some(total / records.len() as f64)
    };

    let last_updated = records.iter().filter_map(FundRecord::valuation_date).max();

    FundSummary {
        count: records.len(),
        best_performer,
        average_return_1y,
        last_updated,
    }
}

/// Distinct categories in first-seen order
pub fn available_categories(records: &[FundRecord]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for record in records {
        if !categories.iter().any(|c| c == &record.category) {
            categories.push(record.category.clone());
        }
    }
    categories
}
