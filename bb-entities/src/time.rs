use std::fmt;

use thiserror::Error;
use time::{
    format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime, Time,
};

/// Point in time with millisecond precision, e.g. creation and
/// modification dates of stored entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn now() -> Self {
        OffsetDateTime::now_utc().into()
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(from: OffsetDateTime) -> Self {
        Self((from.unix_timestamp_nanos() / 1_000_000) as i64)
    }
}

impl From<Timestamp> for OffsetDateTime {
    fn from(from: Timestamp) -> Self {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(from.0) * 1_000_000)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(&format_date_time(OffsetDateTime::from(*self)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid time '{0}'")]
pub struct ParseTimeError(pub String);

/// Parses a time of day given as `HH:MM` or `HH:MM:SS`.
pub fn parse_time_of_day(s: &str) -> Result<Time, ParseTimeError> {
    let s = s.trim();
    Time::parse(s, format_description!("[hour]:[minute]:[second]"))
        .or_else(|_| Time::parse(s, format_description!("[hour]:[minute]")))
        .map_err(|_| ParseTimeError(s.to_owned()))
}

pub fn format_time_of_day(t: Time) -> String {
    t.format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_else(|_| t.to_string())
}

/// Parses an RFC 3339 date-time, e.g. `2026-10-16T13:20:00+01:00`.
pub fn parse_date_time(s: &str) -> Result<OffsetDateTime, ParseTimeError> {
    OffsetDateTime::parse(s.trim(), &Rfc3339).map_err(|_| ParseTimeError(s.to_owned()))
}

pub fn format_date_time(dt: OffsetDateTime) -> String {
    dt.format(&Rfc3339).unwrap_or_else(|_| dt.to_string())
}
