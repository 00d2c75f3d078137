//! Simulation clock helpers.
//!
//! The engine keeps its routing clock as milliseconds elapsed since the
//! start date; these helpers turn that into calendar time and render it in
//! the engine's `MON-DD-YYYY HH:MM:SS` report format.

use chrono::{NaiveDateTime, TimeDelta};

/// Calendar time reached `elapsed_ms` milliseconds after `start`.
///
/// Sub-millisecond remainders are truncated.
pub fn offset(start: NaiveDateTime, elapsed_ms: f64) -> NaiveDateTime {
    let ms = if elapsed_ms.is_finite() {
        elapsed_ms.max(0.0) as i64
    } else {
        0
    };
    start
        .checked_add_signed(TimeDelta::milliseconds(ms))
        .unwrap_or(start)
}

/// Render a date-time as `JAN-01-2000 00:00:00`.
pub fn format_datetime(t: NaiveDateTime) -> String {
    t.format("%b-%d-%Y %H:%M:%S").to_string().to_uppercase()
}
