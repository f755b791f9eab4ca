//! Worktime specs (`2h30`) and `HhMM` rendering.

use std::sync::LazyLock;

use regex::Regex;

use crate::ledger::LedgerError;

/// Pre-compiled regex for `HhM` worktime specs.
static WORKTIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([0-9]+)h([0-9]{1,2})?$").unwrap());

/// Parses a worktime spec in `HhM` format into minutes.
///
/// Supports `2h30`, `2h`, `0h45` and `8h00`. The minutes part must be below 60.
pub fn parse_worktime(input: &str) -> Result<f64, LedgerError> {
    let invalid = |reason| LedgerError::InvalidWorktime {
        input: input.to_string(),
        reason,
    };

    let trimmed = input.trim();
    if !trimmed.to_ascii_lowercase().contains('h') {
        return Err(invalid("missing the 'h' separator, expected e.g. 2h30"));
    }
    let Some(caps) = WORKTIME_RE.captures(trimmed) else {
        return Err(invalid("expected hours and minutes, e.g. 2h30"));
    };

    let hours: u32 = caps[1].parse().map_err(|_| invalid("hours out of range"))?;
    let minutes: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().map_err(|_| invalid("minutes out of range"))?,
        None => 0,
    };
    if minutes >= 60 {
        return Err(invalid("minutes must be below 60"));
    }

    Ok(f64::from(hours) * 60.0 + f64::from(minutes))
}

/// Formats minutes as `HhMM`, rounded to the nearest minute.
///
/// Negative values get a leading `-`.
#[allow(clippy::cast_possible_truncation)]
pub fn format_hhmm(minutes: f64) -> String {
    let total = minutes.round() as i64;
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    format!("{sign}{}h{:02}", total / 60, total % 60)
}

/// Formats minutes as `HhMM` with an explicit sign, e.g. `+1h05` or `-5h30`.
pub fn format_signed_hhmm(minutes: f64) -> String {
    let formatted = format_hhmm(minutes);
    if formatted.starts_with('-') {
        formatted
    } else {
        format!("+{formatted}")
    }
}
