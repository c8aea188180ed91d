//! Period date parsing
//!
//! Upstream dates are `DD-MM-YYYY` strings. Parsing is strict: exactly two
//! day digits, two month digits and four year digits separated by `-`.

use chrono::NaiveDate;

/// Parses a `DD-MM-YYYY` date, returning `None` for anything else
pub fn parse_period_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'-' || bytes[5] != b'-' {
        return None;
    }

    let day = digits(value, 0..2)?;
    let month = digits(value, 3..5)?;
    let year = digits(value, 6..10)?;

    NaiveDate::from_ymd_opt(year as i32, month, day)
}

fn digits(value: &str, range: std::ops::Range<usize>) -> Option<u32> {
    let part = value.get(range)?;
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Formats a date back into `DD-MM-YYYY`
pub fn format_period_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}
