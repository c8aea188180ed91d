//! Comprehensive tests for domain_fund

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use proptest::prelude::*;

use core_kernel::PortError;
use domain_fund::adapters::{StaticFundSource, UpstreamConfig, UpstreamFundSource};
use domain_fund::{
    available_categories, derive_summary, derive_view, export_to_delimited_text,
    parse_period_date, CsvExport, DataOrigin, FundDataService, FundError, FundSource,
    ReturnPeriod, RiskLevel, Selection, SortKey, SortOrder, ViewState,
};
use test_utils::*;

fn names(rows: &[domain_fund::FundRecord]) -> Vec<&str> {
    rows.iter().map(|r| r.name.as_str()).collect()
}

// ============================================================================
// View Derivation Tests
// ============================================================================

mod view_tests {
    use super::*;

    #[test]
    fn test_sort_by_name_then_toggle() {
        let records = FundFixtures::unordered_pair();
        let state = ViewState::default();

        assert_eq!(names(&derive_view(&records, &state)), vec!["A", "B"]);

        let toggled = state.toggle_sort(SortKey::Name);
        assert_eq!(toggled.sort_order, SortOrder::Desc);
        assert_eq!(names(&derive_view(&records, &toggled)), vec!["B", "A"]);
    }

    #[test]
    fn test_new_key_resets_to_ascending() {
        let state = ViewState::default()
            .sorted_by(SortKey::Name, SortOrder::Desc)
            .toggle_sort(SortKey::Returns(ReturnPeriod::OneYear));

        assert_eq!(state.sort_key, SortKey::Returns(ReturnPeriod::OneYear));
        assert_eq!(state.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let state = ViewState::default().with_search("hdfc");

        let rows = derive_view(&FundFixtures::bundled(), &state);

        assert_eq!(names(&rows), vec!["HDFC Mid-Cap Opportunities"]);
    }

    #[test]
    fn test_category_and_risk_combine() {
        let state = ViewState::default()
            .with_category(Selection::Only("Small Cap".to_string()))
            .with_risk(Selection::Only(RiskLevel::High));

        let rows = derive_view(&FundFixtures::bundled(), &state);

        assert_eq!(names(&rows), vec!["SBI Small Cap Fund"]);
    }

    #[test]
    fn test_no_match_yields_empty() {
        let state = ViewState::default()
            .with_category(Selection::Only("Liquid".to_string()))
            .with_risk(Selection::Only(RiskLevel::High));

        assert!(derive_view(&FundFixtures::bundled(), &state).is_empty());
    }

    #[test]
    fn test_sort_by_return_descending() {
        let state = ViewState::default()
            .sorted_by(SortKey::Returns(ReturnPeriod::OneYear), SortOrder::Desc);

        let rows = derive_view(&FundFixtures::bundled(), &state);

        assert_eq!(rows[0].name, "SBI Small Cap Fund");
        assert_eq!(rows[4].name, "Kotak Corporate Bond Fund");
        assert_sorted_by(&rows, state.sort_key, state.sort_order);
    }

    #[test]
    fn test_unsortable_key_keeps_input_order() {
        let records = FundFixtures::bundled();
        let state = ViewState::default().sorted_by(SortKey::Dates, SortOrder::Desc);

        assert_same_ids(&derive_view(&records, &state), &records);
    }

    #[test]
    fn test_missing_current_date_sorts_after_dated() {
        let dated = FundFixtures::axis_with_dates();
        let undated = FundFixtures::hdfc_midcap();
        let records = vec![undated.clone(), dated.clone()];
        let state = ViewState::default().sorted_by(SortKey::CurrentDate, SortOrder::Asc);

        assert_same_ids(&derive_view(&records, &state), &[dated, undated]);
    }

    #[test]
    fn test_large_set_with_mixed_current_dates() {
        let records: Vec<_> = (0..60)
            .map(|i| {
                let builder = FundRecordBuilder::new()
                    .with_id(&format!("F{:03}", i))
                    .with_name(format!("Fund {}", i));
                if i % 3 == 0 {
                    builder.build()
                } else {
                    let date = format!("{:02}-{:02}-2024", (i * 7) % 28 + 1, i % 12 + 1);
                    builder.with_current_date(&date).build()
                }
            })
            .collect();
        let undated: Vec<_> = records
            .iter()
            .filter(|r| r.current_date.is_none())
            .cloned()
            .collect();

        for order in [SortOrder::Asc, SortOrder::Desc] {
            let state = ViewState::default().sorted_by(SortKey::CurrentDate, order);
            let rows = derive_view(&records, &state);

            assert_eq!(rows.len(), records.len());
            assert_sorted_by(&rows, SortKey::CurrentDate, order);
            assert!(rows[..40].iter().all(|r| r.current_date.is_some()));
            assert_same_ids(&rows[40..], &undated);
        }
    }

    #[test]
    fn test_view_state_from_json() {
        let state: ViewState = serde_json::from_value(serde_json::json!({
            "searchTerm": "fund",
            "selectedCategory": "all",
            "selectedRisk": "Low",
            "sortKey": "returns3y",
            "sortOrder": "desc"
        }))
        .unwrap();

        assert_eq!(state.selected_category, Selection::All);
        assert_eq!(state.selected_risk, Selection::Only(RiskLevel::Low));
        assert_eq!(state.sort_key, SortKey::Returns(ReturnPeriod::ThreeYears));
    }

    #[test]
    fn test_unknown_sort_key_rejected() {
        let err = "expense_ratio".parse::<SortKey>().unwrap_err();
        assert!(matches!(err, FundError::UnknownSortKey(_)));
    }
}

// ============================================================================
// Summary Tests
// ============================================================================

mod summary_tests {
    use super::*;

    #[test]
    fn test_bundled_summary() {
        let summary = derive_summary(&FundFixtures::bundled());

        assert_eq!(summary.count, 5);
        assert_eq!(summary.best_performer, Some(FundFixtures::sbi_small_cap()));
        assert_approx_eq(summary.average_return_1y.unwrap(), 15.804, 1e-9);
    }

    #[test]
    fn test_empty_summary() {
        let summary = derive_summary(&[]);

        assert_eq!(summary.count, 0);
        assert_eq!(summary.best_performer, None);
        assert_eq!(summary.average_return_1y, None);
        assert_eq!(summary.last_updated, None);
    }

    #[test]
    fn test_tie_keeps_first() {
        let first = FundRecordBuilder::new().with_id("x").with_return(ReturnPeriod::OneYear, 9.0).build();
        let second = FundRecordBuilder::new().with_id("y").with_return(ReturnPeriod::OneYear, 9.0).build();

        let summary = derive_summary(&[first.clone(), second]);

        assert_eq!(summary.best_performer.map(|r| r.id), Some(first.id));
    }

    #[test]
    fn test_last_updated_from_valuation_dates() {
        let records = vec![FundFixtures::axis_with_dates(), FundFixtures::hdfc_midcap()];

        let summary = derive_summary(&records);

        assert_eq!(summary.last_updated, Some(TemporalFixtures::valuation_date()));
    }

    #[test]
    fn test_categories_first_seen() {
        let categories = available_categories(&FundFixtures::bundled());
        assert_eq!(categories, vec!["Large Cap", "Mid Cap", "Liquid", "Small Cap", "Debt"]);
    }
}

// ============================================================================
// Export Tests
// ============================================================================

mod export_tests {
    use super::*;

    #[test]
    fn test_axis_row() {
        let text = export_to_delimited_text(&[FundFixtures::axis_bluechip()]);
        let row = text.lines().nth(1).unwrap();

        assert!(row.starts_with("\"Axis Bluechip Fund\",45.23,"));
        assert_eq!(row, "\"Axis Bluechip Fund\",45.23,0.5,1.2,3.4,8.2,12.5,18.3,14.2,16.8");
    }

    #[test]
    fn test_one_row_per_record() {
        let text = export_to_delimited_text(&FundFixtures::bundled());
        assert_eq!(text.lines().count(), 6);
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_empty_export_refused() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert!(matches!(CsvExport::build(&[], date), Err(FundError::NothingToExport)));
    }

    #[test]
    fn test_export_of_derived_view() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let rows = derive_view(&FundFixtures::bundled(), &ViewState::default().with_search("fund"));

        let export = CsvExport::build(&rows, date).unwrap();

        assert_eq!(export.filename, "mutual-fund-data-2024-03-05.csv");
        assert_eq!(export.content.lines().count(), rows.len() + 1);
    }
}

// ============================================================================
// Period Date Tests
// ============================================================================

mod period_date_tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(
            parse_period_date("05-03-2024"),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_period_date("bad"), None);
        assert_eq!(parse_period_date("31-02-2024"), None);
        assert_eq!(parse_period_date("2024-03-05"), None);
    }

    #[test]
    fn test_record_period_dates() {
        let record = FundFixtures::axis_with_dates();

        assert_eq!(
            record.period_date(ReturnPeriod::OneYear),
            NaiveDate::from_ymd_opt(2023, 3, 6)
        );
        assert_eq!(record.period_date(ReturnPeriod::FiveYears), None);
        assert_eq!(record.fund_house(), "Axis");
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_average_is_mean(records in fund_records_strategy(64)) {
            prop_assume!(!records.is_empty());
            let summary = derive_summary(&records);
            let mean = records.iter().map(|r| r.returns_1y).sum::<f64>() / records.len() as f64;

            assert_approx_eq(summary.average_return_1y.unwrap(), mean, 1e-9);
        }

        #[test]
        fn prop_best_performer_dominates(records in fund_records_strategy(64)) {
            let summary = derive_summary(&records);
            if let Some(best) = summary.best_performer {
                prop_assert!(records.iter().all(|r| best.returns_1y >= r.returns_1y));
            } else {
                prop_assert!(records.is_empty());
            }
        }

        #[test]
        fn prop_filtering_idempotent(
            records in fund_records_strategy(64),
            state in view_state_strategy(),
        ) {
            let once = derive_view(&records, &state);
            let twice = derive_view(&once, &state);

            assert_same_ids(&twice, &once);
            assert_all_admitted(&once, &state);
        }

        #[test]
        fn prop_rows_are_ordered(
            records in fund_records_strategy(64),
            state in view_state_strategy(),
        ) {
            let rows = derive_view(&records, &state);
            assert_sorted_by(&rows, state.sort_key, state.sort_order);
        }

        #[test]
        fn prop_undated_rows_keep_input_order(
            records in fund_records_strategy(64),
            order in sort_order_strategy(),
        ) {
            let state = ViewState::default().sorted_by(SortKey::CurrentDate, order);
            let rows = derive_view(&records, &state);
            let (dated, undated): (Vec<_>, Vec<_>) =
                records.iter().cloned().partition(|r| r.current_date.is_some());

            prop_assert!(rows[..dated.len()].iter().all(|r| r.current_date.is_some()));
            assert_same_ids(&rows[dated.len()..], &undated);
        }

        #[test]
        fn prop_descending_reverses_ascending(
            records in fund_records_strategy(64),
            key in numeric_sort_key_strategy(),
        ) {
            let mut values: Vec<f64> = records
                .iter()
                .map(|r| match r.sort_value(key) {
                    domain_fund::view::SortValue::Number(n) => n,
                    _ => f64::NAN,
                })
                .collect();
            values.sort_by(|a, b| a.partial_cmp(b).unwrap());
            values.dedup();
            prop_assume!(values.len() == records.len());

            let asc = derive_view(&records, &ViewState::default().sorted_by(key, SortOrder::Asc));
            let mut desc = derive_view(&records, &ViewState::default().sorted_by(key, SortOrder::Desc));
            desc.reverse();

            assert_same_ids(&desc, &asc);
        }

        #[test]
        fn prop_period_date_roundtrip(date in calendar_date_strategy()) {
            let text = domain_fund::format_period_date(date);
            prop_assert_eq!(parse_period_date(&text), Some(date));
        }
    }
}

// ============================================================================
// Data Service Tests
// ============================================================================

mod service_tests {
    use super::*;

    fn service(primary: Arc<ScriptedFundSource>) -> FundDataService {
        FundDataService::new(primary, Arc::new(StaticFundSource::bundled()))
            .with_timeout(Duration::from_millis(500))
    }

    #[tokio::test]
    async fn test_last_known_good_preferred_over_bundled() {
        let upstream = vec![FundFixtures::axis_with_dates()];
        let primary = Arc::new(
            ScriptedFundSource::new("upstream")
                .then(ScriptedResponse::Funds(upstream.clone()))
                .then(ScriptedResponse::Status(502)),
        );
        let service = service(primary.clone());

        assert_eq!(service.load_funds().await.origin, DataOrigin::Primary);
        let degraded = service.load_funds().await;

        assert!(matches!(degraded.origin, DataOrigin::LastKnownGood { .. }));
        assert_eq!(degraded.funds, upstream);
        assert_eq!(primary.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_malformed_payload_falls_back() {
        let primary = Arc::new(ScriptedFundSource::new("upstream").then(ScriptedResponse::Malformed));

        let load = service(primary).load_funds().await;

        assert!(load.origin.is_degraded());
        assert_eq!(load.funds, FundFixtures::bundled());
    }

    #[tokio::test]
    async fn test_hanging_primary_times_out() {
        let primary = Arc::new(ScriptedFundSource::new("upstream").then(ScriptedResponse::Hang));
        let service = service(primary).with_timeout(Duration::from_millis(50));

        let load = service.load_funds().await;

        match load.origin {
            DataOrigin::Fallback { reason } => assert!(reason.contains("Timeout")),
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_both_tiers_failing_is_unavailable() {
        let primary = Arc::new(ScriptedFundSource::new("upstream").then(ScriptedResponse::Transport));
        let fallback = Arc::new(ScriptedFundSource::new("bundled").then(ScriptedResponse::Malformed));
        let service = FundDataService::new(primary, fallback);

        let load = service.load_funds().await;

        assert!(matches!(load.origin, DataOrigin::Unavailable { .. }));
        assert!(load.funds.is_empty());
    }

    #[tokio::test]
    async fn test_stale_response_discarded() {
        let slow = vec![FundFixtures::axis_bluechip()];
        let fast = vec![FundFixtures::hdfc_midcap()];
        let primary = Arc::new(
            ScriptedFundSource::new("upstream")
                .then_after(Duration::from_millis(200), ScriptedResponse::Funds(slow))
                .then(ScriptedResponse::Funds(fast.clone())),
        );
        let service = service(primary);

        let (first, second) = tokio::join!(service.load_funds(), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            service.load_funds().await
        });

        assert_eq!(second.sequence, 2);
        assert_eq!(second.funds, fast);
        assert_eq!(first.sequence, 2);
        assert_eq!(first.funds, fast);
        assert_eq!(service.last_known_good().await, Some(fast));
    }

    #[tokio::test]
    async fn test_refresh_failure_surfaces() {
        let primary = Arc::new(ScriptedFundSource::new("upstream").with_refresh_failure(500));

        let err = service(primary.clone()).refresh_funds().await.unwrap_err();

        assert!(matches!(err, PortError::UpstreamStatus { status: 500, .. }));
        assert_eq!(primary.refresh_calls(), 1);
    }
}

// ============================================================================
// Upstream Adapter Tests
// ============================================================================

mod upstream_tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};

    /// Serves `app` on an ephemeral port and returns its base URL
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn source(base_url: String) -> UpstreamFundSource {
        UpstreamFundSource::new(UpstreamConfig {
            base_url,
            timeout: Duration::from_secs(2),
            max_retries: 0,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_parses_payload() {
        let app = Router::new().route(
            "/api/funds",
            get(|| async { Json(FundFixtures::upstream_payload()) }),
        );
        let upstream = source(serve(app).await);

        let funds = upstream.fetch_funds().await.unwrap();

        assert_eq!(funds.len(), 1);
        assert_eq!(funds[0].id.as_str(), "119551");
        assert_eq!(funds[0].nav, 341.5721);
        assert_eq!(funds[0].valuation_date(), NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(funds[0].period_date(ReturnPeriod::OneDay), NaiveDate::from_ymd_opt(2024, 3, 4));
    }

    #[tokio::test]
    async fn test_error_status_mapped() {
        let app = Router::new().route(
            "/api/funds",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let upstream = source(serve(app).await);

        let err = upstream.fetch_funds().await.unwrap_err();

        assert!(matches!(err, PortError::UpstreamStatus { status: 500, .. }));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_slow_first_attempt_is_retried_within_budget() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let app = Router::new().route(
            "/api/funds",
            get(move || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        tokio::time::sleep(Duration::from_secs(5)).await;
                    }
                    Json(FundFixtures::upstream_payload())
                }
            }),
        );
        let upstream = UpstreamFundSource::new(UpstreamConfig {
            base_url: serve(app).await,
            timeout: Duration::from_millis(1500),
            max_retries: 2,
        })
        .unwrap();

        let funds = upstream.fetch_funds().await.unwrap();

        assert_eq!(funds.len(), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_return_field_is_parse_failure() {
        let app = Router::new().route(
            "/api/funds",
            get(|| async {
                Json(serde_json::json!({
                    "funds": [{ "id": "1", "name": "X", "nav": 1.0, "category": "Debt", "risk": "Low" }]
                }))
            }),
        );
        let upstream = source(serve(app).await);

        let err = upstream.fetch_funds().await.unwrap_err();

        assert!(matches!(err, PortError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_refresh_passes_acknowledgment_through() {
        let app = Router::new().route(
            "/api/refresh",
            post(|| async { Json(serde_json::json!({ "success": true, "updated": 42 })) }),
        );
        let upstream = source(serve(app).await);

        let ack = upstream.trigger_refresh().await.unwrap();

        assert!(ack.is_success());
        assert_eq!(ack.0["updated"], 42);
    }

    #[tokio::test]
    async fn test_service_over_dead_upstream_serves_bundled() {
        let upstream = source("http://127.0.0.1:1".to_string());
        let service = FundDataService::new(Arc::new(upstream), Arc::new(StaticFundSource::bundled()));

        let load = service.load_funds().await;

        assert!(matches!(load.origin, DataOrigin::Fallback { .. }));
        assert_eq!(load.funds.len(), 5);
    }
}
