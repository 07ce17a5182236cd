use log::{debug, info};
use prstats_common::Result;

use crate::config::ReportConfig;
use crate::filter::{select_recent, ttm_values, Bucket, STANDARD_BUCKETS};
use crate::record::PullRequestRecord;
use crate::report::render;
use crate::stats::Stats;

/// Outcome of one report section.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub bucket: Bucket,
    pub description: String,
    pub sample_count: usize,
    /// Rendered text, or `EmptySample` when no merge fell in the bucket.
    pub rendered: Result<String>,
}

/// Build every standard section from the records created inside the recency window.
pub fn generate(records: &[PullRequestRecord], config: &ReportConfig) -> Vec<Section> {
    let recent = select_recent(records, config.cutoff);
    info!(
        "{} of {} pull requests created after {}",
        recent.len(),
        records.len(),
        config.cutoff
    );

    STANDARD_BUCKETS
        .iter()
        .map(|bucket| {
            let sample = ttm_values(recent.iter().copied(), bucket.min_ttm);
            let description = bucket.description(config);
            debug!("{description}: {} merges", sample.len());
            let rendered =
                Stats::new(&sample).map(|stats| render(&stats, &description, sample.len()));
            Section {
                bucket: *bucket,
                description,
                sample_count: sample.len(),
                rendered,
            }
        })
        .collect()
}
