//! Tests for the clock abstraction

use chrono::{Duration, TimeZone, Utc};
use core_kernel::{Clock, FixedClock, SystemClock};
use proptest::prelude::*;

#[test]
fn test_fixed_clock_is_stable() {
    let at = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let clock = FixedClock::new(at);
    assert_eq!(clock.now(), clock.now());
}

#[test]
fn test_fixed_clock_set() {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    let later = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    clock.set(later);
    assert_eq!(clock.now(), later);
}

#[test]
fn test_clock_is_object_safe() {
    let clocks: Vec<Box<dyn Clock>> = vec![
        Box::new(SystemClock),
        Box::new(FixedClock::new(Utc::now())),
    ];
    assert_eq!(clocks.len(), 2);
}

proptest! {
    #[test]
    fn prop_advance_is_additive(a in 0i64..1_000_000, b in 0i64..1_000_000) {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = FixedClock::new(start);
        clock.advance(Duration::milliseconds(a));
        clock.advance(Duration::milliseconds(b));
        prop_assert_eq!(clock.now(), start + Duration::milliseconds(a + b));
    }
}
