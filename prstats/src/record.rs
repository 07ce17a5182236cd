use chrono::{DateTime, FixedOffset};
use log::debug;
use prstats_common::{Column, PrStatsError, Result};
use serde::Serialize;
use std::fmt;

use crate::config::{PACIFIC_UTC_OFFSET, TIMESTAMP_FORMAT};
use crate::source::RawRow;

const SECONDS_PER_DAY: i64 = 86_400;

/// One pull request from the export.
///
/// `time_to_merge` is present exactly when `merged` is, and holds the whole
/// days between creation and merge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PullRequestRecord {
    pub repo: String,
    pub number: String,
    pub user: String,
    pub title: String,
    pub state: String,
    pub created: Option<DateTime<FixedOffset>>,
    pub updated: Option<DateTime<FixedOffset>>,
    pub merged: Option<DateTime<FixedOffset>>,
    pub time_to_merge: Option<i64>,
    pub url: String,
}

impl PullRequestRecord {
    pub fn parse(row: &RawRow) -> Result<Self> {
        let created = parse_timestamp(Column::Created, row.get(Column::Created))?;
        let updated = parse_timestamp(Column::Updated, row.get(Column::Updated))?;
        let merged = parse_timestamp(Column::Merged, row.get(Column::Merged))?;

        let time_to_merge = match (created, merged) {
            (_, None) => None,
            (Some(created), Some(merged)) => Some(whole_days_between(created, merged)),
            (None, Some(_)) => {
                return Err(PrStatsError::MalformedInput(format!(
                    "pull request {} {} has a merge time but no creation time",
                    row.get(Column::Repository),
                    row.get(Column::Number),
                )));
            }
        };

        let record = Self {
            repo: row.get(Column::Repository).to_string(),
            number: row.get(Column::Number).to_string(),
            user: row.get(Column::User).to_string(),
            title: row.get(Column::Title).to_string(),
            state: row.get(Column::State).to_string(),
            created,
            updated,
            merged,
            time_to_merge,
            url: row.get(Column::Url).to_string(),
        };
        debug!("parsed {record}");
        Ok(record)
    }

    pub fn is_merged(&self) -> bool {
        self.merged.is_some()
    }
}

impl fmt::Display for PullRequestRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{} by {} [{}] created {} merged {}",
            self.repo,
            self.number,
            self.user,
            self.state,
            display_or_dash(self.created.as_ref()),
            display_or_dash(self.merged.as_ref()),
        )?;
        if let Some(days) = self.time_to_merge {
            write!(f, " after {days}d")?;
        }
        write!(f, ": {}", self.title)
    }
}

fn display_or_dash<T: fmt::Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Read an export timestamp (`MM/DD/YY HH:MM:SS`, US Pacific).
/// An empty cell means the event has not happened and yields `None`.
pub fn parse_timestamp(column: Column, value: &str) -> Result<Option<DateTime<FixedOffset>>> {
    if value.is_empty() {
        return Ok(None);
    }
    let zoned = format!("{value} {PACIFIC_UTC_OFFSET}");
    DateTime::parse_from_str(&zoned, TIMESTAMP_FORMAT)
        .map(Some)
        .map_err(|_| PrStatsError::DateParse {
            column: column.as_name().to_string(),
            value: value.to_string(),
        })
}

/// Whole days from `start` to `end`, rounded toward negative infinity.
pub fn whole_days_between(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> i64 {
    (end - start).num_seconds().div_euclid(SECONDS_PER_DAY)
}
