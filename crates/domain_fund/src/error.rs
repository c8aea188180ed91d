//! Fund domain errors

use thiserror::Error;

/// Errors that can occur in the fund domain
#[derive(Debug, Error)]
pub enum FundError {
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("Unknown sort order: {0}")]
    UnknownSortOrder(String),

    #[error("Unknown risk level: {0}")]
    UnknownRiskLevel(String),

    #[error("Invalid fund record: {0}")]
    InvalidRecord(String),

    #[error("Invalid investment: {0}")]
    InvalidInvestment(String),

    #[error("No records to export")]
    NothingToExport,
}
