//! Bundled fund dataset
//!
//! Served when no upstream is configured and used as the last fallback tier
//! when the upstream cannot be reached.

use crate::fund::{FundRecord, RiskLevel};

/// Categories the bundled dataset covers, in display order
pub const BUNDLED_CATEGORIES: [&str; 5] = ["Large Cap", "Mid Cap", "Small Cap", "Liquid", "Debt"];

/// The bundled records
pub fn bundled_funds() -> Vec<FundRecord> {
    vec![
        FundRecord::new("1", "Axis Bluechip Fund", 45.23, "Large Cap", RiskLevel::Medium)
            .with_returns([0.5, 1.2, 3.4, 8.2, 12.5, 18.3, 14.2, 16.8]),
        FundRecord::new("2", "HDFC Mid-Cap Opportunities", 89.45, "Mid Cap", RiskLevel::High)
            .with_returns([-0.3, 2.1, 4.8, 11.2, 15.8, 22.4, 18.6, 19.2]),
        FundRecord::new("3", "ICICI Prudential Liquid Fund", 312.67, "Liquid", RiskLevel::Low)
            .with_returns([0.02, 0.12, 0.48, 1.45, 2.89, 5.8, 6.2, 6.5]),
        FundRecord::new("4", "SBI Small Cap Fund", 124.89, "Small Cap", RiskLevel::High)
            .with_returns([1.2, 3.4, 6.2, 14.5, 19.8, 28.6, 22.4, 24.8]),
        FundRecord::new("5", "Kotak Corporate Bond Fund", 2945.12, "Debt", RiskLevel::Low)
            .with_returns([0.01, 0.08, 0.32, 0.98, 1.95, 3.92, 5.8, 6.2]),
    ]
}
