use prstats_common::Result;

use crate::config::{
    COLUMN_GAP, PERCENTILES_PER_LINE, PERCENTILE_RANKS, PERCENT_UNAVAILABLE, SEPARATOR,
    WITHIN_DAYS, WITHIN_DAYS_PER_LINE,
};
use crate::stats::Stats;

/// Render one "Time To Merge Stats" block.
///
/// Output depends only on the arguments, and ends with a separator and a blank line.
pub fn render(stats: &Stats, description: &str, sample_count: usize) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(SEPARATOR.to_string());
    lines.push("Time To Merge Stats".to_string());
    lines.push(description.to_string());
    lines.push(format!("n = {sample_count}"));
    lines.push(SEPARATOR.to_string());
    lines.push(format!(" Range: {:>2} - {:>2} days", stats.min(), stats.max()));
    lines.push(format!("  Mean: {:>5.2}", stats.mean()));
    lines.push(format!("Median: {:>5.2}", stats.median()));
    lines.push(format!("StdDev: {:>5.2}", stats.standard_deviation()));

    lines.push(SEPARATOR.to_string());
    lines.push("Percentiles:".to_string());
    for ranks in PERCENTILE_RANKS.chunks(PERCENTILES_PER_LINE) {
        let cells: Vec<String> = ranks
            .iter()
            .map(|&p| format!("{p}% <= {:>2} d", stats.value_from_percentile(p)))
            .collect();
        lines.push(cells.join(COLUMN_GAP));
    }

    lines.push(SEPARATOR.to_string());
    lines.push("Percentage of Merges Within:".to_string());
    for thresholds in WITHIN_DAYS.chunks(WITHIN_DAYS_PER_LINE) {
        let cells: Vec<String> = thresholds
            .iter()
            .map(|&days| {
                format!(
                    "{days:>2} days: {:>2}%",
                    percent_or_sentinel(stats.percentile_from_value(days))
                )
            })
            .collect();
        lines.push(cells.join(COLUMN_GAP));
    }

    lines.push(SEPARATOR.to_string());
    lines.push(String::new());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// The percentage, or `PERCENT_UNAVAILABLE` when it could not be computed.
pub fn percent_or_sentinel(percent: Result<u32>) -> i64 {
    percent.map_or(PERCENT_UNAVAILABLE, i64::from)
}
