//! Core domain logic for the worktime logger.
//!
//! This crate contains the fundamental types and logic for:
//! - Day keys: calendar-day identifiers used to bucket worktime
//! - The worktime log and its invariants
//! - Ledger operations: adding worktime, summarizing, listing entries
//! - Worktime specs (`2h30`) and `HhMM` formatting

mod ledger;
mod log;
mod types;
mod worktime;

pub use ledger::{
    DEFAULT_REQUIRED_MINUTES_PER_DAY, Entries, LedgerError, Summary, add_entry, list_entries,
    summarize,
};
pub use log::{WorktimeEntry, WorktimeLog};
pub use types::{DayKey, ValidationError, datetime_from_timestamp, timestamp_of};
pub use worktime::{format_hhmm, format_signed_hhmm, parse_worktime};
