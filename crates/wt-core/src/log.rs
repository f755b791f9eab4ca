//! The worktime log: one entry per calendar day, in chronological order.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::types::{DayKey, ValidationError, datetime_from_timestamp, timestamp_of};

/// Worktime logged for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorktimeEntry {
    /// Minutes worked on `day`.
    pub minutes: f64,
    /// Unix epoch seconds of the last write to this entry.
    pub timestamp: f64,
    /// The calendar day this entry covers.
    pub day: DayKey,
}

impl WorktimeEntry {
    /// Creates an entry for the day of `at`, stamped with `at`.
    pub fn new<Tz: TimeZone>(minutes: f64, at: &DateTime<Tz>) -> Self {
        Self {
            minutes,
            timestamp: timestamp_of(at),
            day: DayKey::of(at),
        }
    }

    /// Returns when this entry was last written.
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        datetime_from_timestamp(self.timestamp)
    }
}

/// The full worktime history.
///
/// Invariants, checked by [`WorktimeLog::validate`]:
/// - every entry has finite, non-negative minutes and a representable timestamp
/// - timestamps are non-decreasing
/// - day keys are strictly increasing, so each day has at most one entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorktimeLog {
    entries: Vec<WorktimeEntry>,
}

impl WorktimeLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a log from stored entries, rejecting any that break the log invariants.
    pub fn from_entries(entries: Vec<WorktimeEntry>) -> Result<Self, ValidationError> {
        let log = Self { entries };
        log.validate()?;
        Ok(log)
    }

    /// Checks the log invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut previous: Option<&WorktimeEntry> = None;
        for (index, entry) in self.entries.iter().enumerate() {
            if !entry.minutes.is_finite() || entry.minutes < 0.0 {
                return Err(ValidationError::InvalidMinutes {
                    index,
                    value: entry.minutes,
                });
            }
            if entry.recorded_at().is_none() {
                return Err(ValidationError::InvalidTimestamp {
                    index,
                    value: entry.timestamp,
                });
            }
            if let Some(prev) = previous {
                if entry.timestamp < prev.timestamp {
                    return Err(ValidationError::OutOfOrder {
                        index,
                        value: entry.timestamp,
                    });
                }
                if entry.day <= prev.day {
                    return Err(ValidationError::DuplicateDay {
                        index,
                        day: entry.day,
                    });
                }
            }
            previous = Some(entry);
        }
        Ok(())
    }

    /// Returns the entries in chronological order.
    pub fn entries(&self) -> &[WorktimeEntry] {
        &self.entries
    }

    /// Returns the most recent entry, if any.
    pub fn last(&self) -> Option<&WorktimeEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut WorktimeEntry> {
        self.entries.last_mut()
    }

    pub(crate) fn push(&mut self, entry: WorktimeEntry) {
        self.entries.push(entry);
    }
}
