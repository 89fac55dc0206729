//! Timestamp parsing for response fragments.
//!
//! Servers send ISO-8601 strings, usually with a `Z` or numeric offset
//! (`2023-04-01T12:30:00.000Z`). A few omit the offset; those are read as UTC.
//! Anything else is a hard error: a malformed timestamp fails the whole
//! entity instead of being silently dropped.

use crate::error::{Result, SubsonicError};
use chrono::{DateTime, NaiveDateTime, Utc};

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse one server timestamp.
pub fn parse(value: &str) -> Result<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => NaiveDateTime::parse_from_str(value, NAIVE_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|_| SubsonicError::Timestamp {
                value: value.to_owned(),
                source: rfc_err,
            }),
    }
}

/// Parse an optional timestamp. Absent stays `None`.
pub fn parse_opt(value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    value.map(parse).transpose()
}
