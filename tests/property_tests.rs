//! Property-based tests for fid-report
//!
//! - Derived columns match their definitions for any input size
//! - Stats parsing never fails, whatever the bytes
//! - Column union keeps every key exactly once, first-seen order
//! - Run with ProptestConfig::with_cases(100)

use proptest::prelude::*;
use serde_json::{Map, Value};

use fid_report::run::{parse_metric_log, parse_stats, RunSummary, StatsLine, TimingSummary};
use fid_report::table::RunTable;

// ============================================================================
// Strategies
// ============================================================================

/// Quarter steps keep every value exact through a JSON round trip
fn arb_quarter(max: u32) -> impl Strategy<Value = f64> {
    (1u32..max).prop_map(|k| f64::from(k) * 0.25)
}

fn arb_fids() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(arb_quarter(2000), 0..30)
}

fn arb_row() -> impl Strategy<Value = Map<String, Value>> {
    proptest::collection::vec(("[a-e]{1,2}", 0i64..100), 0..6).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect()
    })
}

fn fid_log(fids: &[f64]) -> String {
    fids.iter()
        .map(|fid| format!("{}\n", serde_json::json!({"results": {"fid50k_full": fid}})))
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: actual_kimg = 40 * (N - 1), including N = 0
    #[test]
    fn prop_actual_kimg_from_count(fids in arb_fids()) {
        let n = fids.len() as i64;
        let summary = RunSummary::new("run", fids, TimingSummary::default(), 40);
        prop_assert_eq!(summary.actual_kimg(), 40 * (n - 1));
    }

    /// Property: min_fid is the list minimum, or None when empty
    #[test]
    fn prop_min_fid(fids in arb_fids()) {
        let expected = fids.iter().copied().fold(None, |acc: Option<f64>, x| {
            Some(acc.map_or(x, |m| m.min(x)))
        });
        let summary = RunSummary::new("run", fids.clone(), TimingSummary::default(), 40);
        prop_assert_eq!(summary.min_fid(), expected);
        if let Some(min) = summary.min_fid() {
            prop_assert!(fids.iter().all(|&f| f >= min));
        }
    }

    /// Property: metric log parsing preserves values and order
    #[test]
    fn prop_metric_log_preserves_order(fids in arb_fids()) {
        let text = fid_log(&fids);
        let parsed = parse_metric_log(&text, "fid50k_full", std::path::Path::new("m.jsonl")).unwrap();
        prop_assert_eq!(parsed, fids);
    }

    /// Property: avg_sec_kimg is the mean and run_duration the max
    #[test]
    fn prop_timing_mean_and_max(
        secs in proptest::collection::vec(arb_quarter(400), 0..20),
        hours in proptest::collection::vec(arb_quarter(200), 0..20),
    ) {
        let mut text = String::new();
        for sec in &secs {
            text.push_str(&format!("{{\"Timing/sec_per_kimg\": {{\"mean\": {sec}}}}}\n"));
        }
        text.push_str("not json\n");
        for hour in &hours {
            text.push_str(&format!("{{\"Timing/total_hours\": {{\"mean\": {hour}}}}}\n"));
        }

        let summary = TimingSummary::from_lines(parse_stats(text.as_bytes()));

        match summary.avg_sec_kimg {
            None => prop_assert!(secs.is_empty()),
            Some(avg) => {
                let expected = secs.iter().sum::<f64>() / secs.len() as f64;
                prop_assert!((avg - expected).abs() < 1e-9);
            }
        }
        let expected_max = hours.iter().copied().reduce(f64::max);
        prop_assert_eq!(summary.run_duration, expected_max);
    }

    /// Property: arbitrary bytes never panic, they only skip
    #[test]
    fn prop_stats_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        for line in parse_stats(&bytes) {
            prop_assert!(matches!(line, StatsLine::Parsed { .. } | StatsLine::Skipped), "unexpected stats line variant");
        }
    }

    /// Property: every key appears exactly once, in first-seen order
    #[test]
    fn prop_column_union(rows in proptest::collection::vec(arb_row(), 0..8)) {
        let mut expected: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !expected.contains(key) {
                    expected.push(key.clone());
                }
            }
        }

        let table = RunTable::from_rows(rows.clone());
        prop_assert_eq!(table.columns(), expected.as_slice());
        prop_assert_eq!(table.len(), rows.len());
        for (idx, row) in rows.iter().enumerate() {
            for column in table.columns() {
                prop_assert_eq!(table.cell(idx, column), row.get(column));
            }
        }
    }
}
