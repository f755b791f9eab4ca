//! Show command for summarizing the worktime log.

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;
use chrono::TimeZone;
use serde::Serialize;
use wt_core::{Summary, WorktimeLog, format_hhmm, format_signed_hhmm, list_entries, summarize};

/// What `show` prints and against which quota.
#[derive(Debug, Clone, Copy)]
pub struct ShowOptions {
    /// List every entry before the summary.
    pub full: bool,
    /// Print a JSON document instead of text.
    pub json: bool,
    pub required_minutes_per_day: f64,
}

/// Runs the show command.
///
/// The summary is computed first, so an empty log fails before anything is
/// written.
pub fn run<W, Tz>(
    writer: &mut W,
    log: &WorktimeLog,
    options: &ShowOptions,
    tz: &Tz,
) -> Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let summary = summarize(log, options.required_minutes_per_day)?;
    tracing::debug!(
        days = summary.day_count,
        total = summary.total_minutes,
        delta = summary.delta_minutes,
        "summarized worktime log"
    );

    if options.json {
        let output = format_show_json(log, &summary, options, tz)?;
        writeln!(writer, "{output}")?;
        return Ok(());
    }

    if options.full {
        for (recorded_at, minutes) in list_entries(log, tz) {
            writeln!(writer, "{recorded_at} : logged {}", format_hhmm(minutes))?;
        }
        writeln!(
            writer,
            "Full worktime: {}",
            format_hhmm(summary.total_minutes)
        )?;
    }
    write_summary(writer, &summary)
}

fn write_summary<W: Write>(writer: &mut W, summary: &Summary) -> Result<()> {
    writeln!(writer, "Summary:")?;
    writeln!(writer, "  days of work: {}", summary.day_count)?;
    writeln!(
        writer,
        "  worktime per day: {}",
        format_hhmm(summary.average_minutes())
    )?;
    writeln!(
        writer,
        "  worktime delta: {}",
        format_signed_hhmm(summary.delta_minutes)
    )?;
    Ok(())
}

// ========== JSON Output ==========

#[derive(Debug, Serialize)]
struct JsonShow {
    summary: JsonSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    entries: Option<Vec<JsonEntry>>,
}

#[derive(Debug, Serialize)]
struct JsonSummary {
    days_of_work: usize,
    total_minutes: f64,
    average_minutes: f64,
    delta_minutes: f64,
    required_minutes_per_day: f64,
}

#[derive(Debug, Serialize)]
struct JsonEntry {
    recorded_at: String,
    minutes: f64,
}

fn format_show_json<Tz>(
    log: &WorktimeLog,
    summary: &Summary,
    options: &ShowOptions,
    tz: &Tz,
) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let entries = options.full.then(|| {
        list_entries(log, tz)
            .map(|(recorded_at, minutes)| JsonEntry {
                recorded_at,
                minutes,
            })
            .collect()
    });

    let report = JsonShow {
        summary: JsonSummary {
            days_of_work: summary.day_count,
            total_minutes: summary.total_minutes,
            average_minutes: summary.average_minutes(),
            delta_minutes: summary.delta_minutes,
            required_minutes_per_day: options.required_minutes_per_day,
        },
        entries,
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{DateTime, Utc};
    use insta::assert_snapshot;
    use wt_core::{DEFAULT_REQUIRED_MINUTES_PER_DAY, LedgerError, add_entry};

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, hour, minute, 0).unwrap()
    }

    fn two_day_log() -> WorktimeLog {
        let log = add_entry(WorktimeLog::new(), 150.0, &at(6, 17, 30)).unwrap();
        add_entry(log, 480.0, &at(7, 18, 0)).unwrap()
    }

    fn options(full: bool, json: bool) -> ShowOptions {
        ShowOptions {
            full,
            json,
            required_minutes_per_day: DEFAULT_REQUIRED_MINUTES_PER_DAY,
        }
    }

    fn show(log: &WorktimeLog, options: &ShowOptions) -> String {
        let mut output = Vec::new();
        run(&mut output, log, options, &Utc).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn show_single_day_summary() {
        let log = add_entry(WorktimeLog::new(), 150.0, &at(6, 17, 30)).unwrap();

        assert_eq!(
            show(&log, &options(false, false)),
            "Summary:\n  days of work: 1\n  worktime per day: 2h30\n  worktime delta: -5h30\n"
        );
    }

    #[test]
    fn show_full_lists_entries_then_summary() {
        let output = show(&two_day_log(), &options(true, false));

        assert_snapshot!(output, @r"
        2025-01-06 17:30:00 : logged 2h30
        2025-01-07 18:00:00 : logged 8h00
        Full worktime: 10h30
        Summary:
          days of work: 2
          worktime per day: 5h15
          worktime delta: -5h30
        ");
    }

    #[test]
    fn show_total_only_with_full() {
        let log = two_day_log();

        assert!(!show(&log, &options(false, false)).contains("Full worktime"));
        let full = show(&log, &options(true, false));
        assert!(full.contains("\nFull worktime: 10h30\nSummary:\n"));
    }

    #[test]
    fn show_overtime_has_plus_sign() {
        let log = add_entry(WorktimeLog::new(), 545.0, &at(6, 19, 0)).unwrap();

        let output = show(&log, &options(false, false));
        assert!(output.ends_with("  worktime delta: +1h05\n"));
    }

    #[test]
    fn show_uses_configured_quota() {
        let log = add_entry(WorktimeLog::new(), 450.0, &at(6, 17, 0)).unwrap();
        let options = ShowOptions {
            required_minutes_per_day: 450.0,
            ..options(false, false)
        };

        let output = show(&log, &options);
        assert!(output.ends_with("  worktime delta: +0h00\n"));
    }

    #[test]
    fn show_empty_log_fails_without_output() {
        let mut output = Vec::new();
        let err = run(&mut output, &WorktimeLog::new(), &options(true, false), &Utc)
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<LedgerError>(),
            Some(&LedgerError::EmptyLog)
        );
        assert!(output.is_empty());
    }

    #[test]
    fn show_json_summary_only() {
        let output = show(&two_day_log(), &options(false, true));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "summary": {
                    "days_of_work": 2,
                    "total_minutes": 630.0,
                    "average_minutes": 315.0,
                    "delta_minutes": -330.0,
                    "required_minutes_per_day": 480.0
                }
            })
        );
    }

    #[test]
    fn show_json_full_includes_entries() {
        let output = show(&two_day_log(), &options(true, true));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(
            value["entries"],
            serde_json::json!([
                {"recorded_at": "2025-01-06 17:30:00", "minutes": 150.0},
                {"recorded_at": "2025-01-07 18:00:00", "minutes": 480.0}
            ])
        );
    }
}
