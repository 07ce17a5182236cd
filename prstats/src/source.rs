use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use prstats_common::{Column, PrStatsError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::record::PullRequestRecord;

/// The required fields of one export row, copied verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: [String; Column::ALL.len()],
}

impl RawRow {
    /// Build a row from `(column name, value)` pairs.
    /// Unknown names are ignored; a required column that is absent reads as empty.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut row = RawRow::default();
        for (name, value) in pairs {
            if let Some(column) = Column::from_name(name) {
                row.fields[column as usize] = value.to_string();
            }
        }
        row
    }

    pub fn get(&self, column: Column) -> &str {
        &self.fields[column as usize]
    }
}

/// Where each required column sits in the export's header row.
/// Validated once per file so that every data row can be read by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    positions: [usize; Column::ALL.len()],
}

impl Schema {
    /// Fails with `InvalidCsv` naming the first required column the header lacks.
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        let mut positions = [0; Column::ALL.len()];
        for (slot, column) in positions.iter_mut().zip(Column::ALL) {
            *slot = headers
                .iter()
                .position(|h| h == column.as_name())
                .ok_or_else(|| {
                    PrStatsError::InvalidCsv(format!("missing column {:?}", column.as_name()))
                })?;
        }
        Ok(Self { positions })
    }

    pub fn position(&self, column: Column) -> usize {
        self.positions[column as usize]
    }

    /// Fewest fields a data row may have and still carry every required column.
    pub fn min_width(&self) -> usize {
        self.positions.iter().max().map_or(0, |&p| p + 1)
    }

    /// Pick the required fields out of one data record.
    pub fn extract(&self, record: &StringRecord) -> Result<RawRow> {
        let width = self.min_width();
        if record.len() < width {
            let line = record.position().map_or(0, |p| p.line());
            return Err(PrStatsError::MalformedInput(format!(
                "line {line} has {} fields, expected at least {width}",
                record.len()
            )));
        }
        let mut row = RawRow::default();
        for column in Column::ALL {
            row.fields[column as usize] = record[self.position(column)].to_string();
        }
        Ok(row)
    }
}

/// Read a header row followed by data rows, validating the schema before the first row.
pub fn load_rows(reader: impl Read) -> Result<Vec<RawRow>> {
    // Flexible so that short rows surface as MalformedInput rather than a reader error.
    let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| PrStatsError::InvalidCsv(e.to_string()))?
        .clone();
    let schema = Schema::from_headers(&headers)?;
    debug!("column positions: {schema:?}");

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| PrStatsError::InvalidCsv(e.to_string()))?;
        rows.push(schema.extract(&record)?);
    }
    Ok(rows)
}

/// Parse every row of `reader` into a record, stopping at the first bad row.
pub fn read_records(reader: impl Read) -> Result<Vec<PullRequestRecord>> {
    load_rows(reader)?
        .iter()
        .map(PullRequestRecord::parse)
        .collect()
}

/// Open the export at `path` and parse all of it eagerly.
pub fn load_records(path: &Path) -> Result<Vec<PullRequestRecord>> {
    let file = File::open(path).map_err(|e| {
        PrStatsError::InvalidCsv(format!("cannot read {}: {e}", path.display()))
    })?;
    let records = read_records(file)?;
    info!("loaded {} pull requests from {}", records.len(), path.display());
    Ok(records)
}
