//! Core type definitions with validation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The value is not a `YYYY-MM-DD` calendar date.
    #[error("invalid day key {value:?}, expected YYYY-MM-DD")]
    InvalidDayKey { value: String },

    /// The timestamp is not finite or not representable as a date-time.
    #[error("entry {index}: invalid timestamp {value}")]
    InvalidTimestamp { index: usize, value: f64 },

    /// The logged minutes are negative or not finite.
    #[error("entry {index}: worktime must be finite and non-negative, got {value}")]
    InvalidMinutes { index: usize, value: f64 },

    /// An entry was recorded before its predecessor.
    #[error("entry {index}: timestamp {value} is earlier than the previous entry")]
    OutOfOrder { index: usize, value: f64 },

    /// An entry does not start a new calendar day.
    #[error("entry {index}: day {day} is already covered by an earlier entry")]
    DuplicateDay { index: usize, day: DayKey },
}

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// A calendar-day identifier, rendered as `YYYY-MM-DD`.
///
/// Two worktime additions belong to the same entry exactly when their day
/// keys are equal. Day keys compare chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Returns the day key of `at`, in `at`'s own time zone.
    pub fn of<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self(at.date_naive())
    }

    /// Returns the day key of a Unix timestamp (seconds) as seen in `tz`.
    ///
    /// Returns `None` when the timestamp is not a representable date-time.
    pub fn from_timestamp<Tz: TimeZone>(timestamp: f64, tz: &Tz) -> Option<Self> {
        datetime_from_timestamp(timestamp).map(|at| Self::of(&at.with_timezone(tz)))
    }

    /// Returns the underlying calendar date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidDayKey {
            value: s.to_string(),
        };
        // chrono accepts unpadded fields; the key format does not
        if s.len() != 10 {
            return Err(invalid());
        }
        NaiveDate::parse_from_str(s, DAY_KEY_FORMAT)
            .map(Self)
            .map_err(|_| invalid())
    }
}

impl TryFrom<String> for DayKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}

/// Converts Unix epoch seconds into a UTC date-time, with microsecond precision.
///
/// Returns `None` for non-finite or out-of-range values.
#[allow(clippy::cast_possible_truncation)]
pub fn datetime_from_timestamp(timestamp: f64) -> Option<DateTime<Utc>> {
    if !timestamp.is_finite() {
        return None;
    }
    // `as` saturates, and out-of-range micros are rejected by chrono
    DateTime::from_timestamp_micros((timestamp * 1_000_000.0).round() as i64)
}

/// Converts a date-time into Unix epoch seconds, with microsecond precision.
#[allow(clippy::cast_precision_loss)]
pub fn timestamp_of<Tz: TimeZone>(at: &DateTime<Tz>) -> f64 {
    at.timestamp_micros() as f64 / 1_000_000.0
}
