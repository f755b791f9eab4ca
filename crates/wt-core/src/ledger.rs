//! Ledger operations over a loaded worktime log.
//!
//! Adding worktime merges into today's entry when one exists, otherwise it
//! starts a new day. Summaries compare the logged total against a daily quota.

use std::fmt;
use std::slice;

use chrono::{DateTime, TimeZone};
use serde::Serialize;
use thiserror::Error;

use crate::log::{WorktimeEntry, WorktimeLog};
use crate::types::{DayKey, timestamp_of};

/// Eight hours, in minutes.
pub const DEFAULT_REQUIRED_MINUTES_PER_DAY: f64 = 8.0 * 60.0;

/// Format used when listing entries.
const ENTRY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors from ledger operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    /// Neither a worktime spec nor an uptime reading was supplied.
    #[error("no worktime given")]
    NoWorktime,

    /// The worktime spec could not be parsed.
    #[error("invalid worktime {input:?}: {reason}")]
    InvalidWorktime { input: String, reason: &'static str },

    /// The duration to log is negative or not finite.
    #[error("worktime must be a finite, non-negative number of minutes, got {value}")]
    InvalidDuration { value: f64 },

    /// The clock is earlier than the last entry.
    #[error("current time {now} is earlier than the last logged entry at {last}")]
    ClockBehindLog { last: f64, now: f64 },

    /// Today's date is earlier than the last entry's day.
    #[error("current day {today} is earlier than the last logged day {last}")]
    DayBehindLog { last: DayKey, today: DayKey },

    /// A summary was requested for a log with no entries.
    #[error("worktime log is empty, nothing to summarize")]
    EmptyLog,
}

/// Aggregate figures over the whole log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub total_minutes: f64,
    pub day_count: usize,
    /// Cumulative overtime (positive) or undertime (negative) against the quota.
    pub delta_minutes: f64,
}

impl Summary {
    /// Average minutes logged per day.
    #[allow(clippy::cast_precision_loss)]
    pub fn average_minutes(&self) -> f64 {
        self.total_minutes / self.day_count as f64
    }
}

/// Adds `duration_minutes` of worktime at `now`.
///
/// If the last entry is for the same day as `now`, the duration is added to
/// it and its timestamp moves to `now`. Otherwise a new entry is appended.
/// A zero duration is accepted and only refreshes the timestamp.
///
/// The caller persists the returned log.
pub fn add_entry<Tz: TimeZone>(
    mut log: WorktimeLog,
    duration_minutes: f64,
    now: &DateTime<Tz>,
) -> Result<WorktimeLog, LedgerError> {
    if !duration_minutes.is_finite() || duration_minutes < 0.0 {
        return Err(LedgerError::InvalidDuration {
            value: duration_minutes,
        });
    }

    let today = DayKey::of(now);
    let timestamp = timestamp_of(now);

    if let Some(last) = log.last() {
        if timestamp < last.timestamp {
            return Err(LedgerError::ClockBehindLog {
                last: last.timestamp,
                now: timestamp,
            });
        }
        if today < last.day {
            return Err(LedgerError::DayBehindLog {
                last: last.day,
                today,
            });
        }
    }

    match log.last_mut() {
        Some(last) if last.day == today => {
            last.minutes += duration_minutes;
            last.timestamp = timestamp;
        }
        _ => log.push(WorktimeEntry::new(duration_minutes, now)),
    }

    Ok(log)
}

/// Summarizes the log against a daily quota of `required_minutes_per_day`.
///
/// Each entry counts as one day of work.
#[allow(clippy::cast_precision_loss)]
pub fn summarize(
    log: &WorktimeLog,
    required_minutes_per_day: f64,
) -> Result<Summary, LedgerError> {
    if log.is_empty() {
        return Err(LedgerError::EmptyLog);
    }

    let day_count = log.len();
    let total_minutes: f64 = log.entries().iter().map(|e| e.minutes).sum();

    Ok(Summary {
        total_minutes,
        day_count,
        delta_minutes: total_minutes - day_count as f64 * required_minutes_per_day,
    })
}

/// Lists the entries of `log` in stored order, with timestamps rendered in `tz`.
pub fn list_entries<'a, Tz: TimeZone>(log: &'a WorktimeLog, tz: &'a Tz) -> Entries<'a, Tz> {
    Entries {
        inner: log.entries().iter(),
        tz,
    }
}

/// Iterator returned by [`list_entries`].
///
/// Yields `(formatted_date, minutes)`. Clone it to walk the entries again.
#[derive(Clone)]
pub struct Entries<'a, Tz> {
    inner: slice::Iter<'a, WorktimeEntry>,
    tz: &'a Tz,
}

impl<Tz> Entries<'_, Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    fn render(&self, entry: &WorktimeEntry) -> String {
        // validated logs always have a representable timestamp
        entry.recorded_at().map_or_else(
            || entry.timestamp.to_string(),
            |at| at.with_timezone(self.tz).format(ENTRY_TIME_FORMAT).to_string(),
        )
    }
}

impl<Tz> Iterator for Entries<'_, Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    type Item = (String, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next()?;
        Some((self.render(entry), entry.minutes))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<Tz> ExactSizeIterator for Entries<'_, Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
}
