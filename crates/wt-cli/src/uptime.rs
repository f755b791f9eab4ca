//! Uptime-derived worktime.

use sysinfo::System;

/// Minutes elapsed since the system booted.
pub fn uptime_minutes() -> f64 {
    let seconds = System::uptime();
    tracing::debug!(seconds, "read system uptime");
    seconds_to_minutes(seconds)
}

/// Converts whole seconds into fractional minutes.
#[allow(clippy::cast_precision_loss)]
pub fn seconds_to_minutes(seconds: u64) -> f64 {
    seconds as f64 / 60.0
}
