//! Fund Domain
//!
//! This crate holds everything the fund dashboard knows about funds: the
//! records themselves, the pure derivations behind the table, and the data
//! access layer that loads records from an upstream service with fallback.
//!
//! # Key Concepts
//!
//! - **Fund record**: one fund's NAV and trailing returns, replaced wholesale on refresh
//! - **View state**: search text, filters and sort, turned into rows by [`derive_view`]
//! - **Summary**: count, best 1Y performer and average 1Y return
//! - **Fund source**: a port yielding records; the upstream service and the
//!   bundled dataset are its adapters
//! - **Fund data service**: primary + fallback tiers with a stale-response guard
//!
//! # Unit Precision
//!
//! Portfolio units are stored with 4 decimal places:
//! - Amount: ₹50,000
//! - NAV: ₹45.23
//! - Units: 1105.4610

pub mod fund;
pub mod returns;
pub mod dates;
pub mod view;
pub mod summary;
pub mod export;
pub mod catalog;
pub mod portfolio;
pub mod ports;
pub mod service;
pub mod adapters;
pub mod error;

pub use fund::{FundRecord, RiskLevel};
pub use returns::{ReturnPeriod, Horizon, ReturnTrend, format_return};
pub use dates::{parse_period_date, format_period_date};
pub use view::{ViewState, Selection, SortKey, SortOrder, derive_view};
pub use summary::{FundSummary, derive_summary, available_categories};
pub use export::{CsvExport, export_to_delimited_text, export_filename};
pub use catalog::bundled_funds;
pub use portfolio::{Investment, Portfolio, PortfolioSummary};
pub use ports::{FundSource, FundsPayload, RefreshAck};
pub use service::{FundDataService, FundLoad, DataOrigin};
pub use error::FundError;

use rust_decimal::Decimal;

/// Standard unit precision (4 decimal places)
pub const UNIT_PRECISION: u32 = 4;

/// Rounds a value to standard unit precision
pub fn round_units(value: Decimal) -> Decimal {
    value.round_dp(UNIT_PRECISION)
}

/// Calculates units from an amount and NAV
///
/// # Arguments
///
/// * `amount` - The monetary amount to convert
/// * `nav` - The Net Asset Value per unit
///
/// # Returns
///
/// The number of units (rounded to 4 decimal places), zero for a zero NAV
///
/// # Example
///
/// ```rust
/// use domain_fund::calculate_units;
/// use rust_decimal_macros::dec;
///
/// let units = calculate_units(dec!(50000), dec!(45.23));
/// assert_eq!(units, dec!(1105.4610));
/// ```
pub fn calculate_units(amount: Decimal, nav: Decimal) -> Decimal {
    if nav.is_zero() {
        return Decimal::ZERO;
    }
    round_units(amount / nav)
}

/// Calculates the value of units at a given NAV, rounded to currency precision
pub fn calculate_value(units: Decimal, nav: Decimal) -> Decimal {
    (units * nav).round_dp(2)
}
