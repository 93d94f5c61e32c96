//! Shared primitive types and the timestamp text format.

use chrono::NaiveDateTime;
use rusqlite::{types::Type, Row};

use crate::error::{TelemetryError, TelemetryResult};

/// Primary key of a SimulationRuns row.
pub type SimulationId = i64;

/// Primary key of any event row.
pub type RowId = i64;

/// Timestamps are stored as ISO-8601 text with a `T` separator.
/// Fractional seconds are written only when non-zero.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Accepts both `T` and space separated forms.
pub fn parse_timestamp(value: &str) -> TelemetryResult<NaiveDateTime> {
    value
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|source| TelemetryError::Timestamp {
            value: value.to_string(),
            source,
        })
}

/// Read a DATETIME column inside a rusqlite row mapper.
pub(crate) fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    parse_timestamp(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn optional_timestamp_column(
    row: &Row<'_>,
    idx: usize,
) -> rusqlite::Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| {
        parse_timestamp(&s)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}
