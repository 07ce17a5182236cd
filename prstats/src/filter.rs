use chrono::{DateTime, Utc};

use crate::config::ReportConfig;
use crate::record::PullRequestRecord;

/// One report section: merges taking at least `min_ttm` days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub label: &'static str,
    pub min_ttm: i64,
}

/// The three sections printed on every run, in order.
pub const STANDARD_BUCKETS: [Bucket; 3] = [
    Bucket {
        label: "All Merges",
        min_ttm: 0,
    },
    Bucket {
        label: "PRs taking >0 days",
        min_ttm: 1,
    },
    Bucket {
        label: "PRs taking >2 days",
        min_ttm: 3,
    },
];

impl Bucket {
    pub fn description(&self, config: &ReportConfig) -> String {
        format!("{} ({})", self.label, config.window_label())
    }
}

/// Records created strictly after `cutoff`. Records without a creation time are dropped.
pub fn select_recent(
    records: &[PullRequestRecord],
    cutoff: DateTime<Utc>,
) -> Vec<&PullRequestRecord> {
    records
        .iter()
        .filter(|pr| pr.created.is_some_and(|created| created.with_timezone(&Utc) > cutoff))
        .collect()
}

/// Time-to-merge values of at least `min_ttm` days, in input order.
/// Unmerged records never contribute, whatever the threshold.
pub fn ttm_values<'a, I>(records: I, min_ttm: i64) -> Vec<i64>
where
    I: IntoIterator<Item = &'a PullRequestRecord>,
{
    records
        .into_iter()
        .filter_map(|pr| pr.time_to_merge)
        .filter(|&days| days >= min_ttm)
        .collect()
}
