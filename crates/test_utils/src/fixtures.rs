//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the fund tracker.
//! These fixtures are designed to be consistent and predictable for unit tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use core_kernel::NoteId;
use domain_fund::{bundled_funds, FundRecord, ReturnPeriod, RiskLevel};
use domain_notes::Note;

/// Fixture for fund records
pub struct FundFixtures;

impl FundFixtures {
    /// The five-fund bundled dataset
    pub fn bundled() -> Vec<FundRecord> {
        bundled_funds()
    }

    /// Axis Bluechip Fund, NAV 45.23, 1Y 18.3
    pub fn axis_bluechip() -> FundRecord {
        Self::by_id("1")
    }

    /// HDFC Mid-Cap Opportunities, the only name containing "hdfc"
    pub fn hdfc_midcap() -> FundRecord {
        Self::by_id("2")
    }

    /// SBI Small Cap Fund, the best 1Y performer of the bundled set
    pub fn sbi_small_cap() -> FundRecord {
        Self::by_id("4")
    }

    /// Two records out of name order: B (1Y 5) then A (1Y 10)
    pub fn unordered_pair() -> Vec<FundRecord> {
        vec![
            FundRecord::new("b", "B", 10.0, "Debt", RiskLevel::Low)
                .with_returns([0.0, 0.0, 0.0, 0.0, 0.0, 5.0, 0.0, 0.0]),
            FundRecord::new("a", "A", 20.0, "Debt", RiskLevel::Low)
                .with_returns([0.0, 0.0, 0.0, 0.0, 0.0, 10.0, 0.0, 0.0]),
        ]
    }

    /// Axis Bluechip as the upstream reports it, with valuation dates
    pub fn axis_with_dates() -> FundRecord {
        Self::axis_bluechip()
            .with_current_date("05-03-2024")
            .with_period_date(ReturnPeriod::OneDay, "04-03-2024")
            .with_period_date(ReturnPeriod::OneYear, "06-03-2023")
    }

    /// Upstream JSON for a single dated record
    pub fn upstream_payload() -> serde_json::Value {
        serde_json::json!({
            "funds": [{
                "id": "119551",
                "name": "Aditya Birla Sun Life Banking & PSU Debt Fund",
                "nav": 341.5721,
                "returns1d": 0.03,
                "returns1w": 0.11,
                "returns1m": 0.62,
                "returns3m": 1.84,
                "returns6m": 3.71,
                "returns1y": 7.45,
                "returns3y": 5.92,
                "returns5y": 7.1,
                "category": "Debt",
                "risk": "Low",
                "dates": { "1d": "04-03-2024", "1y": "06-03-2023" },
                "current_date": "05-03-2024"
            }]
        })
    }

    fn by_id(id: &str) -> FundRecord {
        bundled_funds()
            .into_iter()
            .find(|f| f.id.as_str() == id)
            .unwrap()
    }
}

/// Fixture for notes
pub struct NoteFixtures;

impl NoteFixtures {
    /// Two notes, newest first
    pub fn notes() -> Vec<Note> {
        let older = TemporalFixtures::note_time();
        let newer = older + chrono::Duration::days(1);
        vec![
            Note::new(NoteId::from_timestamp(newer), "Rebalance toward debt", newer),
            Note::new(NoteId::from_timestamp(older), "Review SBI allocation", older),
        ]
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Creation time used for notes (5 Mar 2024, 10:30 UTC)
    pub fn note_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap()
    }

    /// Valuation date matching `axis_with_dates`
    pub fn valuation_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }
}
