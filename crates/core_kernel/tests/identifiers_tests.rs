//! Tests for the identifier types

use chrono::{TimeZone, Utc};
use core_kernel::{FundId, InvestmentId, NoteId};

mod fund_id_tests {
    use super::*;

    #[test]
    fn test_wraps_external_value() {
        let id = FundId::new("1");
        assert_eq!(id.as_str(), "1");
        assert_eq!(id.to_string(), "1");
    }

    #[test]
    fn test_equality_is_by_value() {
        assert_eq!(FundId::from("42"), FundId::new(String::from("42")));
        assert_ne!(FundId::from("42"), FundId::from("43"));
    }

    #[test]
    fn test_deserializes_from_plain_string() {
        let id: FundId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id, FundId::from("abc"));
    }
}

mod note_id_tests {
    use super::*;

    #[test]
    fn test_ids_order_with_creation_time() {
        let earlier = NoteId::from_timestamp(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let later = NoteId::from_timestamp(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 1).unwrap());
        assert!(earlier.timestamp_millis() < later.timestamp_millis());
    }

    #[test]
    fn test_non_numeric_id_has_no_timestamp() {
        assert_eq!(NoteId::from("imported").timestamp_millis(), None);
    }
}

mod investment_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        assert_ne!(InvestmentId::new(), InvestmentId::new());
    }

    #[test]
    fn test_from_str_without_prefix() {
        let original = InvestmentId::new();
        let parsed: InvestmentId = original.as_uuid().to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(InvestmentId::prefix(), "INV");
    }
}
