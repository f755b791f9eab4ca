//! On-disk JSON schema.
//!
//! ```json
//! {"data": [{"worktime": 150.0, "timestamp": 1736184600.0, "day": "2025-01-06"}]}
//! ```
//!
//! `worktime` (minutes) and `timestamp` (Unix seconds) may also be numeric
//! strings. `day` may be missing, in which case it is derived from the
//! timestamp in the reader's time zone. Writes always use numbers and include
//! `day`.

use chrono::TimeZone;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use wt_core::{DayKey, ValidationError, WorktimeEntry, WorktimeLog};

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoredLog {
    data: Vec<StoredEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    #[serde(deserialize_with = "number_or_string")]
    worktime: f64,
    #[serde(deserialize_with = "number_or_string")]
    timestamp: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    day: Option<DayKey>,
}

/// Accepts `150`, `150.5` or `"150.5"`.
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected a number, got {s:?}"))),
    }
}

impl StoredLog {
    /// Converts into a validated log, deriving missing day keys in `tz`.
    pub fn into_log<Tz: TimeZone>(self, tz: &Tz) -> Result<WorktimeLog, ValidationError> {
        let entries = self
            .data
            .into_iter()
            .enumerate()
            .map(|(index, stored)| -> Result<WorktimeEntry, ValidationError> {
                let day = match stored.day {
                    Some(day) => day,
                    None => DayKey::from_timestamp(stored.timestamp, tz).ok_or(
                        ValidationError::InvalidTimestamp {
                            index,
                            value: stored.timestamp,
                        },
                    )?,
                };
                Ok(WorktimeEntry {
                    minutes: stored.worktime,
                    timestamp: stored.timestamp,
                    day,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        WorktimeLog::from_entries(entries)
    }
}

impl From<&WorktimeLog> for StoredLog {
    fn from(log: &WorktimeLog) -> Self {
        Self {
            data: log
                .entries()
                .iter()
                .map(|entry| StoredEntry {
                    worktime: entry.minutes,
                    timestamp: entry.timestamp,
                    day: Some(entry.day),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, reason = "fixtures use exactly representable values")]
mod tests {
    use super::*;

    use chrono::{FixedOffset, Utc};

    #[test]
    fn reads_numbers_with_day() {
        let json = r#"{"data": [{"worktime": 150.0, "timestamp": 1736184600.0, "day": "2025-01-06"}]}"#;
        let stored: StoredLog = serde_json::from_str(json).unwrap();
        let log = stored.into_log(&Utc).unwrap();

        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].minutes, 150.0);
        assert_eq!(log.entries()[0].day.to_string(), "2025-01-06");
    }

    #[test]
    fn reads_numeric_strings_without_day() {
        let json = r#"{"data": [
            {"worktime": "150.00", "timestamp": "1736184600.25"},
            {"worktime": "90", "timestamp": "1736272800"}
        ]}"#;
        let stored: StoredLog = serde_json::from_str(json).unwrap();
        let log = stored.into_log(&Utc).unwrap();

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].minutes, 150.0);
        assert_eq!(log.entries()[0].timestamp, 1_736_184_600.25);
        assert_eq!(log.entries()[0].day.to_string(), "2025-01-06");
        assert_eq!(log.entries()[1].day.to_string(), "2025-01-07");
    }

    #[test]
    fn missing_day_is_derived_in_reader_timezone() {
        // 23:30 UTC on Jan 6 is Jan 7 in UTC+1
        let json = r#"{"data": [{"worktime": 60, "timestamp": 1736206200}]}"#;
        let east = FixedOffset::east_opt(3600).unwrap();
        let stored: StoredLog = serde_json::from_str(json).unwrap();
        let log = stored.into_log(&east).unwrap();

        assert_eq!(log.entries()[0].day.to_string(), "2025-01-07");
    }

    #[test]
    fn rejects_non_numeric_strings() {
        let json = r#"{"data": [{"worktime": "lots", "timestamp": 1736184600}]}"#;
        assert!(serde_json::from_str::<StoredLog>(json).is_err());
    }

    #[test]
    fn rejects_unknown_top_level_fields() {
        let json = r#"{"data": [], "version": 2}"#;
        assert!(serde_json::from_str::<StoredLog>(json).is_err());
    }

    #[test]
    fn rejects_missing_data() {
        assert!(serde_json::from_str::<StoredLog>("{}").is_err());
    }

    #[test]
    fn rejects_repeated_days() {
        let json = r#"{"data": [
            {"worktime": 60, "timestamp": 1736150400},
            {"worktime": 60, "timestamp": 1736154000}
        ]}"#;
        let stored: StoredLog = serde_json::from_str(json).unwrap();
        assert!(matches!(
            stored.into_log(&Utc),
            Err(ValidationError::DuplicateDay { index: 1, .. })
        ));
    }

    #[test]
    fn writes_numbers_and_day() {
        let log = WorktimeLog::from_entries(vec![WorktimeEntry {
            minutes: 150.0,
            timestamp: 1_736_184_600.0,
            day: "2025-01-06".parse().unwrap(),
        }])
        .unwrap();

        let json = serde_json::to_string(&StoredLog::from(&log)).unwrap();
        assert_eq!(
            json,
            r#"{"data":[{"worktime":150.0,"timestamp":1736184600.0,"day":"2025-01-06"}]}"#
        );
    }
}
