//! CSV row parsing into [`DailyRecord`]s.
//!
//! Every row either becomes a fully valid record or a [`RowError`]; nothing
//! unparseable leaks downstream as NaN. What happens to invalid rows is
//! decided by [`InvalidRowPolicy`].

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::DailyRecord;

pub const DATE_COLUMN: &str = "date";
pub const MAX_COLUMN: &str = "max_temperature";
pub const MIN_COLUMN: &str = "min_temperature";

/// What to do with a row that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidRowPolicy {
    /// Drop the row and report it.
    #[default]
    Skip,
    /// Fail the whole parse on the first invalid row.
    Reject,
}

impl InvalidRowPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidRowPolicy::Skip => "skip",
            InvalidRowPolicy::Reject => "reject",
        }
    }
}

impl std::fmt::Display for InvalidRowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowErrorKind {
    #[error("invalid date '{0}'")]
    InvalidDate(String),
    #[error("missing value for '{0}'")]
    MissingValue(&'static str),
    #[error("invalid number '{value}' for '{column}'")]
    InvalidNumber { column: &'static str, value: String },
    #[error("non-finite number '{value}' for '{column}'")]
    NonFinite { column: &'static str, value: String },
}

/// A rejected row and the reason it was rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// 1-based line number in the source, header included.
    pub line: u64,
    pub kind: RowErrorKind,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("Invalid row at line {line}: {kind}")]
    InvalidRow { line: u64, kind: RowErrorKind },
}

/// Records that survived validation, plus what was dropped.
#[derive(Debug, Clone, Default)]
pub struct ParsedDataset {
    pub records: Vec<DailyRecord>,
    pub rejected: Vec<RowError>,
    pub rows_read: usize,
}

/// Parse a whole CSV document with a `date,max_temperature,min_temperature` header.
///
/// Extra columns are ignored and column order does not matter.
pub fn parse_records(input: &str, policy: InvalidRowPolicy) -> Result<ParsedDataset, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input.as_bytes());

    let headers = reader.headers()?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or(ParseError::MissingColumn(name))
    };
    let date_idx = column(DATE_COLUMN)?;
    let max_idx = column(MAX_COLUMN)?;
    let min_idx = column(MIN_COLUMN)?;

    let mut parsed = ParsedDataset::default();

    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(idx as u64 + 2);
        parsed.rows_read += 1;

        let result = parse_row(
            row.get(date_idx).unwrap_or_default(),
            row.get(max_idx).unwrap_or_default(),
            row.get(min_idx).unwrap_or_default(),
        );

        match result {
            Ok(record) => parsed.records.push(record),
            Err(kind) => match policy {
                InvalidRowPolicy::Reject => return Err(ParseError::InvalidRow { line, kind }),
                InvalidRowPolicy::Skip => {
                    warn!(line, reason = %kind, "skipping invalid row");
                    parsed.rejected.push(RowError { line, kind });
                }
            },
        }
    }

    debug!(
        rows_read = parsed.rows_read,
        accepted = parsed.records.len(),
        rejected = parsed.rejected.len(),
        "parsed dataset"
    );

    Ok(parsed)
}

/// Validate one row's three text fields.
pub fn parse_row(date: &str, max: &str, min: &str) -> Result<DailyRecord, RowErrorKind> {
    let date = parse_date(date)?;
    let max = parse_temperature(MAX_COLUMN, max)?;
    let min = parse_temperature(MIN_COLUMN, min)?;
    Ok(DailyRecord::new(date, max, min))
}

fn parse_date(raw: &str) -> Result<NaiveDate, RowErrorKind> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RowErrorKind::MissingValue(DATE_COLUMN));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| RowErrorKind::InvalidDate(raw.to_string()))
}

fn parse_temperature(column: &'static str, raw: &str) -> Result<f64, RowErrorKind> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RowErrorKind::MissingValue(column));
    }

    let value: f64 = raw.parse().map_err(|_| RowErrorKind::InvalidNumber {
        column,
        value: raw.to_string(),
    })?;

    if !value.is_finite() {
        return Err(RowErrorKind::NonFinite {
            column,
            value: raw.to_string(),
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
date,max_temperature,min_temperature
2020-01-01,10.5,2.0
2020-01-02, 11 ,3
2020-01-03,abc,1.0
2020-01-04,9.0,
not-a-date,9.0,1.0
2020-01-06,NaN,1.0
";

    #[test]
    fn skip_policy_keeps_valid_rows_and_reports_the_rest() {
        let parsed = parse_records(SAMPLE, InvalidRowPolicy::Skip).unwrap();

        assert_eq!(parsed.rows_read, 6);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[1].max, 11.0);
        assert!(parsed.records.iter().all(|r| r.max.is_finite() && r.min.is_finite()));

        let lines: Vec<u64> = parsed.rejected.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![4, 5, 6, 7]);
        assert_eq!(
            parsed.rejected[0].kind,
            RowErrorKind::InvalidNumber { column: MAX_COLUMN, value: "abc".into() }
        );
        assert_eq!(parsed.rejected[1].kind, RowErrorKind::MissingValue(MIN_COLUMN));
        assert!(matches!(parsed.rejected[2].kind, RowErrorKind::InvalidDate(_)));
        assert!(matches!(parsed.rejected[3].kind, RowErrorKind::NonFinite { .. }));
    }

    #[test]
    fn reject_policy_fails_on_first_invalid_row() {
        let err = parse_records(SAMPLE, InvalidRowPolicy::Reject).unwrap_err();
        match err {
            ParseError::InvalidRow { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_column_is_a_hard_error() {
        let err = parse_records("date,max_temperature\n2020-01-01,3\n", InvalidRowPolicy::Skip)
            .unwrap_err();
        assert!(err.to_string().contains("min_temperature"));
    }

    #[test]
    fn column_order_and_extra_columns_do_not_matter() {
        let input = "station,min_temperature,date,max_temperature\nX,1.5,2021-06-30,20\n";
        let parsed = parse_records(input, InvalidRowPolicy::Reject).unwrap();
        let record = parsed.records[0];
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2021, 6, 30).unwrap());
        assert_eq!((record.max, record.min), (20.0, 1.5));
    }

    #[test]
    fn accepts_datetime_forms() {
        let expected = NaiveDate::from_ymd_opt(2019, 3, 4).unwrap();
        for raw in ["2019-03-04", "2019-03-04T12:00:00", "2019-03-04 00:00:00", "2019-03-04T00:00:00Z"] {
            assert_eq!(parse_row(raw, "1", "0").unwrap().date, expected, "{raw}");
        }
    }
}
