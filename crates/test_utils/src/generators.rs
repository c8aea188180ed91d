//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::NaiveDate;
use proptest::prelude::*;

use domain_fund::catalog::BUNDLED_CATEGORIES;
use domain_fund::{
    format_period_date, FundRecord, ReturnPeriod, RiskLevel, Selection, SortKey, SortOrder,
    ViewState,
};

const NAME_WORDS: [&str; 12] = [
    "Axis", "HDFC", "ICICI", "SBI", "Kotak", "Nippon", "Bluechip", "Mid-Cap", "Liquid",
    "Small", "Bond", "Growth",
];

/// Strategy for generating risk tiers
pub fn risk_level_strategy() -> impl Strategy<Value = RiskLevel> {
    prop_oneof![
        Just(RiskLevel::Low),
        Just(RiskLevel::Medium),
        Just(RiskLevel::High),
    ]
}

/// Strategy for generating one of the bundled categories
pub fn category_strategy() -> impl Strategy<Value = String> {
    proptest::sample::select(BUNDLED_CATEGORIES.to_vec()).prop_map(str::to_string)
}

/// Strategy for generating percentage returns (-50.00 to 100.00)
pub fn return_strategy() -> impl Strategy<Value = f64> {
    (-5000i32..10000i32).prop_map(|n| f64::from(n) / 100.0)
}

/// Strategy for generating NAVs (0.01 to 5000.00)
pub fn nav_strategy() -> impl Strategy<Value = f64> {
    (1i32..500_000i32).prop_map(|n| f64::from(n) / 100.0)
}

/// Strategy for generating fund names of two to four words
pub fn fund_name_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::sample::select(NAME_WORDS.to_vec()), 2..=4)
        .prop_map(|words| words.join(" "))
}

/// Strategy for generating return periods
pub fn return_period_strategy() -> impl Strategy<Value = ReturnPeriod> {
    proptest::sample::select(ReturnPeriod::ALL.to_vec())
}

/// Strategy for generating a fund record with the given id
///
/// About half the records carry a valuation date and a period date, so sorts
/// see present and missing dates side by side.
pub fn fund_record_strategy(id: String) -> impl Strategy<Value = FundRecord> {
    (
        fund_name_strategy(),
        nav_strategy(),
        category_strategy(),
        risk_level_strategy(),
        proptest::array::uniform8(return_strategy()),
        proptest::option::of(calendar_date_strategy()),
        proptest::option::of((return_period_strategy(), calendar_date_strategy())),
    )
        .prop_map(
            move |(name, nav, category, risk, returns, current_date, period_date)| {
                let mut record =
                    FundRecord::new(id.as_str(), name, nav, category, risk).with_returns(returns);
                if let Some(date) = current_date {
                    record = record.with_current_date(format_period_date(date));
                }
                if let Some((period, date)) = period_date {
                    record = record.with_period_date(period, format_period_date(date));
                }
                record
            },
        )
}

/// Strategy for generating record sets with unique ids
pub fn fund_records_strategy(max_len: usize) -> impl Strategy<Value = Vec<FundRecord>> {
    (0..=max_len).prop_flat_map(|len| {
        (0..len)
            .map(|i| fund_record_strategy(format!("F{:03}", i)))
            .collect::<Vec<_>>()
    })
}

/// Strategy for generating every sort key
pub fn sort_key_strategy() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::Id),
        Just(SortKey::Name),
        Just(SortKey::Nav),
        Just(SortKey::Category),
        Just(SortKey::Risk),
        Just(SortKey::Dates),
        Just(SortKey::CurrentDate),
        return_period_strategy().prop_map(SortKey::Returns),
    ]
}

/// Strategy for generating sort keys whose values are always numeric
pub fn numeric_sort_key_strategy() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::Nav),
        return_period_strategy().prop_map(SortKey::Returns),
    ]
}

pub fn sort_order_strategy() -> impl Strategy<Value = SortOrder> {
    prop_oneof![Just(SortOrder::Asc), Just(SortOrder::Desc)]
}

/// Strategy for generating view states over the bundled categories
pub fn view_state_strategy() -> impl Strategy<Value = ViewState> {
    (
        prop_oneof![
            Just(String::new()),
            proptest::sample::select(NAME_WORDS.to_vec()).prop_map(|w| w.to_lowercase()),
        ],
        prop_oneof![
            Just(Selection::All),
            category_strategy().prop_map(Selection::Only),
        ],
        prop_oneof![
            Just(Selection::All),
            risk_level_strategy().prop_map(Selection::Only),
        ],
        sort_key_strategy(),
        sort_order_strategy(),
    )
        .prop_map(|(search, category, risk, key, order)| {
            ViewState::default()
                .with_search(search)
                .with_category(category)
                .with_risk(risk)
                .sorted_by(key, order)
        })
}

/// Strategy for generating valid calendar dates, 2000 to 2099
pub fn calendar_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100i32, 1u32..=12u32, 1u32..=28u32)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}
