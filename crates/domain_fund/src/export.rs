//! Comma-delimited export of the fund table
//!
//! Columns are fixed: name, NAV and the eight returns, shortest period first.
//! Names are always quoted with embedded quotes doubled; numbers are written
//! in their shortest decimal form without rounding.

use chrono::NaiveDate;

use crate::error::FundError;
use crate::fund::FundRecord;
use crate::returns::ReturnPeriod;

/// Header row of the export
pub const EXPORT_HEADER: &str = "Name,NAV,1D,1W,1M,3M,6M,1Y,3Y,5Y";

/// Renders records as comma-delimited text, one row per record after the header
pub fn export_to_delimited_text(records: &[FundRecord]) -> String {
    std::iter::once(EXPORT_HEADER.to_string())
        .chain(records.iter().map(export_row))
        .collect::<Vec<_>>()
        .join("\n")
}

fn export_row(record: &FundRecord) -> String {
    let mut row = quote(&record.name);
    row.push(',');
    row.push_str(&record.nav.to_string());
    for period in ReturnPeriod::ALL {
        row.push(',');
        row.push_str(&record.return_for(period).to_string());
    }
    row
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Download filename for an export taken on `date`
pub fn export_filename(date: NaiveDate) -> String {
    format!("mutual-fund-data-{}.csv", date.format("%Y-%m-%d"))
}

/// A ready-to-download export
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

impl CsvExport {
    /// Builds an export, refusing an empty record set
    pub fn build(records: &[FundRecord], date: NaiveDate) -> Result<Self, FundError> {
        if records.is_empty() {
            return Err(FundError::NothingToExport);
        }
        Ok(Self {
            filename: export_filename(date),
            content: export_to_delimited_text(records),
        })
    }
}
