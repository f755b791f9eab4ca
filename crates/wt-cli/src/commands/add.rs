//! Add command for logging worktime.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use wt_core::{LedgerError, WorktimeEntry, add_entry, format_hhmm, parse_worktime};
use wt_store::Store;

/// Resolves the worktime to log, in minutes.
///
/// A time spec takes precedence; clap already rejects combining it with
/// `--uptime`. With neither, nothing is logged.
pub fn resolve_minutes(
    time: Option<&str>,
    use_uptime: bool,
    read_uptime: impl FnOnce() -> f64,
) -> Result<f64, LedgerError> {
    match (time, use_uptime) {
        (Some(spec), _) => parse_worktime(spec),
        (None, true) => Ok(read_uptime()),
        (None, false) => Err(LedgerError::NoWorktime),
    }
}

/// Runs the add command: load, add `minutes` at `now`, save.
///
/// Returns the entry for the day `minutes` was logged to.
pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    store: &Store,
    minutes: f64,
    now: &DateTime<Tz>,
) -> Result<WorktimeEntry> {
    let log = store
        .load()
        .with_context(|| format!("failed to load {}", store.path().display()))?;
    let log = add_entry(log, minutes, now)?;
    store
        .save(&log)
        .with_context(|| format!("failed to save {}", store.path().display()))?;

    let entry = log
        .last()
        .cloned()
        .context("worktime log is empty after adding")?;
    tracing::info!(minutes, day = %entry.day, total = entry.minutes, "logged worktime");

    writeln!(
        writer,
        "Logged {} for {} ({} today)",
        format_hhmm(minutes),
        entry.day,
        format_hhmm(entry.minutes)
    )?;

    Ok(entry)
}
