//! Table view derivation
//!
//! A [`ViewState`] is an immutable value describing what the user asked to
//! see. [`derive_view`] turns raw records plus a view state into the exact
//! ordered rows to render, with no side effects.
//!
//! # Sorting
//!
//! Values are compared by type: two strings use a locale-style lexical order,
//! two numbers compare numerically, and any other pairing (a missing value or
//! the `dates` map) compares equal so the stable sort keeps input order.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::FundError;
use crate::fund::{FundRecord, RiskLevel};
use crate::returns::ReturnPeriod;

/// Sentinel used on the wire for "no filter"
pub const ALL: &str = "all";

/// A filter that either matches everything or one exact value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    /// Returns true if `value` passes this filter
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Only(value) => value.fmt(f),
        }
    }
}

impl<T: fmt::Display> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T> Deserialize<'de> for Selection<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Any attribute of a [`FundRecord`] the table can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Id,
    Name,
    Nav,
    Returns(ReturnPeriod),
    Category,
    Risk,
    Dates,
    CurrentDate,
}

impl SortKey {
    /// The record attribute name this key sorts by
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::Nav => "nav",
            SortKey::Returns(period) => period.field_name(),
            SortKey::Category => "category",
            SortKey::Risk => "risk",
            SortKey::Dates => "dates",
            SortKey::CurrentDate => "current_date",
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Name
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = FundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "id" => SortKey::Id,
            "name" => SortKey::Name,
            "nav" => SortKey::Nav,
            "category" => SortKey::Category,
            "risk" => SortKey::Risk,
            "dates" => SortKey::Dates,
            "current_date" => SortKey::CurrentDate,
            other => ReturnPeriod::ALL
                .into_iter()
                .find(|p| p.field_name() == other)
                .map(SortKey::Returns)
                .ok_or_else(|| FundError::UnknownSortKey(other.to_string()))?,
        };
        Ok(key)
    }
}

impl Serialize for SortKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = FundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(FundError::UnknownSortOrder(other.to_string())),
        }
    }
}

/// User-controlled view parameters
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub search_term: String,
    pub selected_category: Selection<String>,
    pub selected_risk: Selection<RiskLevel>,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
}

impl ViewState {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_category(mut self, category: Selection<String>) -> Self {
        self.selected_category = category;
        self
    }

    pub fn with_risk(mut self, risk: Selection<RiskLevel>) -> Self {
        self.selected_risk = risk;
        self
    }

    pub fn sorted_by(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort_key = key;
        self.sort_order = order;
        self
    }

    /// Applies a click on a column header
    ///
    /// The same key flips the direction; a different key becomes the sort key
    /// in ascending order.
    pub fn toggle_sort(mut self, key: SortKey) -> Self {
        if self.sort_key == key {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_key = key;
            self.sort_order = SortOrder::Asc;
        }
        self
    }

    /// Returns true if the record passes the search and both filters
    pub fn admits(&self, record: &FundRecord) -> bool {
        contains_case_insensitive(&record.name, &self.search_term)
            && self.selected_category.matches(&record.category)
            && self.selected_risk.matches(&record.risk)
    }
}

/// A record attribute as seen by the comparator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Text(&'a str),
    Number(f64),
    Absent,
}

impl FundRecord {
    /// The value this record contributes to a sort on `key`
    pub fn sort_value(&self, key: SortKey) -> SortValue<'_> {
        match key {
            SortKey::Id => SortValue::Text(self.id.as_str()),
            SortKey::Name => SortValue::Text(&self.name),
            SortKey::Nav => SortValue::Number(self.nav),
            SortKey::Returns(period) => SortValue::Number(self.return_for(period)),
            SortKey::Category => SortValue::Text(&self.category),
            SortKey::Risk => SortValue::Text(self.risk.as_str()),
            SortKey::Dates => SortValue::Absent,
            SortKey::CurrentDate => self
                .current_date
                .as_deref()
                .map_or(SortValue::Absent, SortValue::Text),
        }
    }
}

impl SortValue<'_> {
    /// Whether the record carries a comparable value; NaN counts as absent
    pub fn is_present(&self) -> bool {
        match self {
            SortValue::Text(_) => true,
            SortValue::Number(n) => !n.is_nan(),
            SortValue::Absent => false,
        }
    }
}

/// Compares two present sort values; numbers order before text
pub fn compare_values(a: SortValue<'_>, b: SortValue<'_>) -> Ordering {
    match (a, b) {
        (SortValue::Text(a), SortValue::Text(b)) => locale_compare(a, b),
        (SortValue::Number(a), SortValue::Number(b)) => {
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
        (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Total order used to sort rows in direction `order`
///
/// Present values are compared and directed. Absent values follow every
/// present value in both directions and compare equal among themselves, so a
/// stable sort keeps them in input order.
pub fn compare_rows(a: SortValue<'_>, b: SortValue<'_>, order: SortOrder) -> Ordering {
    match (a.is_present(), b.is_present()) {
        (true, true) => order.apply(compare_values(a, b)),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// Lexical order close to a browser's default collation
///
/// Letters compare case-insensitively first; at equal letters lowercase sorts
/// before uppercase.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

/// Case-insensitive substring test; an empty needle matches everything
pub fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Derives the rows to render: filter, then stable sort under [`compare_rows`]
pub fn derive_view(records: &[FundRecord], state: &ViewState) -> Vec<FundRecord> {
    let mut rows: Vec<FundRecord> = records
        .iter()
        .filter(|record| state.admits(record))
        .cloned()
        .collect();

    rows.sort_by(|a, b| {
        compare_rows(
            a.sort_value(state.sort_key),
            b.sort_value(state.sort_key),
            state.sort_order,
        )
    });

    rows
}
