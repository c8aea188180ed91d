//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use std::cmp::Ordering;

use domain_fund::view::compare_rows;
use domain_fund::{FundRecord, SortKey, SortOrder, ViewState};

/// Asserts that two floats are within `tolerance` of each other
pub fn assert_approx_eq(actual: f64, expected: f64, tolerance: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Values differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that rows are ordered under `key` in direction `order`
///
/// Rows without a value for `key` must come after every row with one.
pub fn assert_sorted_by(rows: &[FundRecord], key: SortKey, order: SortOrder) {
    for pair in rows.windows(2) {
        let ordering = compare_rows(pair[0].sort_value(key), pair[1].sort_value(key), order);
        assert!(
            ordering != Ordering::Greater,
            "Rows out of {:?} order on {}: {:?} before {:?}",
            order,
            key,
            pair[0].name,
            pair[1].name
        );
    }
}

/// Asserts that every row passes the view's filters
pub fn assert_all_admitted(rows: &[FundRecord], state: &ViewState) {
    for row in rows {
        assert!(
            state.admits(row),
            "Row {:?} ({}, {}) does not pass the view filters",
            row.name,
            row.category,
            row.risk
        );
    }
}

/// Asserts that two row lists hold the same ids in the same order
pub fn assert_same_ids(actual: &[FundRecord], expected: &[FundRecord]) {
    let actual_ids: Vec<&str> = actual.iter().map(|r| r.id.as_str()).collect();
    let expected_ids: Vec<&str> = expected.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(actual_ids, expected_ids, "Row ids differ");
}
