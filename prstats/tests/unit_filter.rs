use chrono::{DateTime, Utc};
use prstats::config::ReportConfig;
use prstats::filter::{select_recent, ttm_values, STANDARD_BUCKETS};
use prstats::record::PullRequestRecord;
use prstats::source::RawRow;
use prstats_common::PrStatsError;

// --- Test helpers ---

fn pr(number: &str, created: &str, merged: &str) -> PullRequestRecord {
    PullRequestRecord::parse(&RawRow::from_pairs([
        ("Repository", "acme/widgets"),
        ("#", number),
        ("Created", created),
        ("Merged", merged),
    ]))
    .unwrap()
}

fn utc(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
}

fn numbers(records: &[&PullRequestRecord]) -> Vec<String> {
    records.iter().map(|r| r.number.clone()).collect()
}

// --- select_recent ---

#[test]
fn test_select_recent_is_strictly_after_cutoff() {
    // 01/05/24 10:00:00 Pacific == 2024-01-05T18:00:00Z
    let records = vec![
        pr("1", "01/05/24 09:59:59", ""),
        pr("2", "01/05/24 10:00:00", ""),
        pr("3", "01/05/24 10:00:01", ""),
        pr("4", "", ""),
    ];
    let recent = select_recent(&records, utc("2024-01-05T18:00:00Z"));
    assert_eq!(numbers(&recent), vec!["3"]);
}

#[test]
fn test_select_recent_keeps_input_order() {
    let records = vec![
        pr("9", "03/01/24 00:00:00", ""),
        pr("1", "02/01/24 00:00:00", ""),
        pr("5", "12/01/23 00:00:00", ""),
        pr("4", "02/15/24 00:00:00", ""),
    ];
    let config = ReportConfig::from_now(utc("2024-03-31T00:00:00Z")).unwrap();
    let recent = select_recent(&records, config.cutoff);
    assert_eq!(numbers(&recent), vec!["9", "1", "4"]);
}

// --- ttm_values ---

fn latency_fixture() -> Vec<PullRequestRecord> {
    vec![
        pr("1", "01/05/24 10:00:00", "01/05/24 12:00:00"), // 0
        pr("2", "01/05/24 10:00:00", "01/06/24 10:00:00"), // 1
        pr("3", "01/05/24 10:00:00", "01/07/24 11:00:00"), // 2
        pr("4", "01/05/24 10:00:00", ""),                  // unmerged
        pr("5", "01/05/24 10:00:00", "01/08/24 10:00:00"), // 3
        pr("6", "01/05/24 10:00:00", "01/15/24 10:00:00"), // 10
    ]
}

#[test]
fn test_ttm_values_thresholds() {
    let records = latency_fixture();
    assert_eq!(ttm_values(&records, 0), vec![0, 1, 2, 3, 10]);
    assert_eq!(ttm_values(&records, 1), vec![1, 2, 3, 10]);
    assert_eq!(ttm_values(&records, 3), vec![3, 10]);
    assert_eq!(ttm_values(&records, 11), Vec::<i64>::new());
}

#[test]
fn test_ttm_values_never_includes_unmerged() {
    let records = vec![pr("1", "01/05/24 10:00:00", ""), pr("2", "", "")];
    for min_ttm in [-5, 0, 1, 3] {
        assert!(ttm_values(&records, min_ttm).is_empty(), "min_ttm = {min_ttm}");
    }
}

#[test]
fn test_ttm_values_shrinks_as_threshold_grows() {
    let records = latency_fixture();
    let mut previous = usize::MAX;
    for min_ttm in 0..12 {
        let len = ttm_values(&records, min_ttm).len();
        assert!(len <= previous, "grew at min_ttm = {min_ttm}");
        previous = len;
    }
}

// --- Buckets ---

#[test]
fn test_standard_buckets() {
    let thresholds: Vec<i64> = STANDARD_BUCKETS.iter().map(|b| b.min_ttm).collect();
    assert_eq!(thresholds, vec![0, 1, 3]);

    let config = ReportConfig::from_now(utc("2024-03-31T00:00:00Z")).unwrap();
    let descriptions: Vec<String> = STANDARD_BUCKETS.iter().map(|b| b.description(&config)).collect();
    assert_eq!(
        descriptions,
        vec![
            "All Merges (Last 4 months)",
            "PRs taking >0 days (Last 4 months)",
            "PRs taking >2 days (Last 4 months)",
        ]
    );
}

#[test]
fn test_window_label_for_custom_lookback() {
    let now = utc("2024-03-31T00:00:00Z");
    assert_eq!(ReportConfig::new(now, 45).unwrap().window_label(), "Last 45 days");
    assert_eq!(ReportConfig::new(now, 30).unwrap().window_label(), "Last 30 days");
    assert_eq!(ReportConfig::new(now, 180).unwrap().window_label(), "Last 6 months");
}

#[test]
fn test_config_cutoff_is_lookback_before_now() {
    let config = ReportConfig::from_now(utc("2024-05-01T12:00:00Z")).unwrap();
    assert_eq!(config.lookback_days, 120);
    assert_eq!(config.cutoff, utc("2024-01-02T12:00:00Z"));
}

#[test]
fn test_config_rejects_out_of_range_lookback() {
    let now = utc("2024-05-01T12:00:00Z");
    for lookback_days in [100_000_000, i64::MAX] {
        let err = ReportConfig::new(now, lookback_days).unwrap_err();
        assert!(
            matches!(err, PrStatsError::InvalidArgument(ref msg) if msg.contains("out of range")),
            "lookback {lookback_days}: got {err:?}"
        );
    }
    assert!(matches!(
        ReportConfig::new(now, -1).unwrap_err(),
        PrStatsError::InvalidArgument(_)
    ));
}

#[test]
fn test_config_accepts_zero_lookback() {
    let now = utc("2024-05-01T12:00:00Z");
    let config = ReportConfig::new(now, 0).unwrap();
    assert_eq!(config.cutoff, now);
}
