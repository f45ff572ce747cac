use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::errors::RollupError;
use crate::models::{is_rollup, CellKey, Facet, InputRecord, MetricSums, OutputRow, ALL, OTHER};
use super::summary::RollupSummary;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// What happened to a record handed to [`Rollup::ingest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    Accumulated,
    SkippedNotBeforeToday,
    SkippedRollupRow,
}

/// Accumulator for one reformat pass.
///
/// Every accepted record is added to the 8 cells formed by pairing each of
/// its (normalized) geo, channel and os with `all`.
#[derive(Debug)]
pub struct Rollup {
    today: String,
    cells: BTreeMap<CellKey, MetricSums>,
    summary: RollupSummary,
}

impl Rollup {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: today.format(DATE_FORMAT).to_string(),
            cells: BTreeMap::new(),
            summary: RollupSummary::default(),
        }
    }

    pub fn ingest(&mut self, record: &InputRecord) -> Result<Ingest, RollupError> {
        self.summary.records_read += 1;

        let date = record.get("date")?;
        validate_date(date, record.line)?;
        // Zero-padded ISO dates order lexically the same as chronologically.
        if date >= self.today.as_str() {
            trace!(line = record.line, date, "Skipping record not before today");
            self.summary.skipped_not_before_today += 1;
            return Ok(Ingest::SkippedNotBeforeToday);
        }

        let raw_geo = record.get(Facet::Geography.column())?;
        let raw_channel = record.get(Facet::Channel.column())?;
        let os = record.get(Facet::Os.column())?;
        if is_rollup(raw_geo) || is_rollup(raw_channel) || is_rollup(os) {
            trace!(line = record.line, "Skipping previously rolled-up record");
            self.summary.skipped_rollup_rows += 1;
            return Ok(Ingest::SkippedRollupRow);
        }

        let geo = Facet::Geography.normalize(raw_geo);
        let channel = Facet::Channel.normalize(raw_channel);
        if geo == OTHER && raw_geo != OTHER {
            self.summary.other_geo += 1;
        }
        if channel == OTHER && raw_channel != OTHER {
            self.summary.other_channel += 1;
        }

        let values = MetricSums::parse_with(|key| record.get(key)).map_err(|e| match e {
            RollupError::InvalidMetric(msg) => {
                RollupError::InvalidMetric(format!("line {}: {}", record.line, msg))
            }
            other => other,
        })?;

        for g in [ALL, geo] {
            for c in [ALL, channel] {
                for o in [ALL, os] {
                    self.cells
                        .entry(CellKey::new(g, c, o, date))
                        .or_default()
                        .add(&values);
                }
            }
        }

        self.summary.records_accumulated += 1;
        Ok(Ingest::Accumulated)
    }

    pub fn cells(&self) -> &BTreeMap<CellKey, MetricSums> {
        &self.cells
    }

    /// Flatten into output rows, ordered by cell key.
    pub fn finish(self) -> (Vec<OutputRow>, RollupSummary) {
        let mut summary = self.summary;
        summary.cells = self.cells.len();
        let rows = self
            .cells
            .into_iter()
            .map(|(key, sums)| OutputRow::new(key, sums))
            .collect();
        (rows, summary)
    }
}

/// Run a whole reformat pass over `records`, keeping only dates before `today`.
pub fn aggregate<I>(records: I, today: NaiveDate) -> Result<Vec<OutputRow>, RollupError>
where
    I: IntoIterator<Item = InputRecord>,
{
    aggregate_with_summary(records, today).map(|(rows, _)| rows)
}

pub fn aggregate_with_summary<I>(
    records: I,
    today: NaiveDate,
) -> Result<(Vec<OutputRow>, RollupSummary), RollupError>
where
    I: IntoIterator<Item = InputRecord>,
{
    let mut rollup = Rollup::new(today);
    for record in records {
        rollup.ingest(&record)?;
    }
    let (rows, summary) = rollup.finish();
    debug!(
        records = summary.records_read,
        accumulated = summary.records_accumulated,
        cells = summary.cells,
        "Aggregation complete"
    );
    Ok((rows, summary))
}

/// Require `YYYY-MM-DD` with zero padding, naming a real calendar day.
fn validate_date(date: &str, line: u64) -> Result<(), RollupError> {
    let bytes = date.as_bytes();
    let shaped = bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() });
    if shaped && NaiveDate::parse_from_str(date, DATE_FORMAT).is_ok() {
        Ok(())
    } else {
        Err(RollupError::InvalidDate(format!(
            "line {}: {:?} is not a YYYY-MM-DD date",
            line, date
        )))
    }
}
