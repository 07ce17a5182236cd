use chrono::{DateTime, TimeDelta, Utc};
use prstats_common::{PrStatsError, Result};

use crate::stats::{PercentileMethod, StdDevDenominator};

/// Days counted as one month when sizing the recency window.
pub const DAYS_PER_MONTH: i64 = 30;

/// Months of pull requests included in a report by default.
pub const LOOKBACK_MONTHS: i64 = 4;

/// Default length of the recency window (days).
pub const DEFAULT_LOOKBACK_DAYS: i64 = LOOKBACK_MONTHS * DAYS_PER_MONTH;

/// Export timestamps carry no zone; they are read as US Pacific at this fixed offset.
pub const PACIFIC_UTC_OFFSET: &str = "-0800";

/// Layout of a timestamp cell once `PACIFIC_UTC_OFFSET` has been appended.
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%y %H:%M:%S %z";

/// Horizontal rule between report blocks (48 dashes).
pub const SEPARATOR: &str = "------------------------------------------------";

/// Percentile ranks listed in the "Percentiles" block, three per line.
pub const PERCENTILE_RANKS: [u32; 6] = [50, 60, 70, 80, 90, 95];
pub const PERCENTILES_PER_LINE: usize = 3;

/// Day thresholds listed in the "Percentage of Merges Within" block, two per line.
pub const WITHIN_DAYS: [i64; 7] = [0, 1, 2, 3, 5, 7, 10];
pub const WITHIN_DAYS_PER_LINE: usize = 2;

/// Spacing between entries sharing a report line.
pub const COLUMN_GAP: &str = "     ";

/// Rendered in place of a percentage that could not be computed.
pub const PERCENT_UNAVAILABLE: i64 = -1;

pub const PERCENTILE_METHOD: PercentileMethod = PercentileMethod::Linear;
pub const STD_DEV_DENOMINATOR: StdDevDenominator = StdDevDenominator::Population;

/// Reference instant and recency cutoff, computed once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub now: DateTime<Utc>,
    pub lookback_days: i64,
    /// Pull requests created at or before this instant are left out.
    pub cutoff: DateTime<Utc>,
}

impl ReportConfig {
    /// Fails with `InvalidArgument` when the lookback is negative or reaches
    /// past the earliest representable instant.
    pub fn new(now: DateTime<Utc>, lookback_days: i64) -> Result<Self> {
        if lookback_days < 0 {
            return Err(PrStatsError::InvalidArgument(format!(
                "lookback of {lookback_days} days is negative"
            )));
        }
        let cutoff = TimeDelta::try_days(lookback_days)
            .and_then(|window| now.checked_sub_signed(window))
            .ok_or_else(|| {
                PrStatsError::InvalidArgument(format!(
                    "lookback of {lookback_days} days before {now} is out of range"
                ))
            })?;
        Ok(Self {
            now,
            lookback_days,
            cutoff,
        })
    }

    /// Window with the default four-month lookback ending at `now`.
    pub fn from_now(now: DateTime<Utc>) -> Result<Self> {
        Self::new(now, DEFAULT_LOOKBACK_DAYS)
    }

    /// Human label for the window, e.g. "Last 4 months" or "Last 45 days".
    pub fn window_label(&self) -> String {
        let months = self.lookback_days / DAYS_PER_MONTH;
        if months > 1 && self.lookback_days % DAYS_PER_MONTH == 0 {
            format!("Last {months} months")
        } else {
            format!("Last {} days", self.lookback_days)
        }
    }
}
