//! Date and time rendering
//!
//! Instants are shown in UTC with day-first English patterns.

use super::ast::DateLength;
use super::number::{as_f64, mismatch};
use chrono::{DateTime, Utc};
use glossa_core::{Diagnostic, DiagnosticCode, FormattableValue};

fn date_pattern(length: DateLength) -> &'static str {
    match length {
        DateLength::Short => "%d/%m/%Y",
        DateLength::Medium => "%-d %b %Y",
        DateLength::Long => "%-d %B %Y",
        DateLength::Full => "%A, %-d %B %Y",
    }
}

fn time_pattern(length: DateLength) -> &'static str {
    match length {
        DateLength::Short => "%H:%M",
        DateLength::Medium => "%H:%M:%S",
        DateLength::Long => "%H:%M:%S UTC",
        DateLength::Full => "%H:%M:%S Coordinated Universal Time",
    }
}

/// Instant for an argument bound to a date or time placeholder
///
/// Numbers are read as epoch milliseconds; fractions of a millisecond are
/// dropped toward negative infinity.
pub fn instant(value: &FormattableValue) -> Result<DateTime<Utc>, Diagnostic> {
    let millis = match value {
        FormattableValue::InstantMillis(millis) => *millis,
        other => as_f64(other).ok_or_else(|| mismatch(other, "a date"))?,
    };
    let floored = millis.floor();
    if !floored.is_finite() || floored.abs() > i64::MAX as f64 {
        return Err(out_of_range(millis));
    }
    DateTime::from_timestamp_millis(floored as i64).ok_or_else(|| out_of_range(millis))
}

fn out_of_range(millis: f64) -> Diagnostic {
    Diagnostic::new(
        DiagnosticCode::IllegalArgument,
        format!("instant {millis} ms is outside the supported date range"),
    )
}

/// Render the date part of `value`
pub fn format_date(value: &FormattableValue, length: DateLength) -> Result<String, Diagnostic> {
    Ok(instant(value)?.format(date_pattern(length)).to_string())
}

/// Render the time part of `value`
pub fn format_time(value: &FormattableValue, length: DateLength) -> Result<String, Diagnostic> {
    Ok(instant(value)?.format(time_pattern(length)).to_string())
}

/// Short date and short time, as a bare placeholder shows an instant
pub fn format_date_time(value: &FormattableValue) -> Result<String, Diagnostic> {
    let instant = instant(value)?;
    Ok(format!(
        "{}, {}",
        instant.format(date_pattern(DateLength::Short)),
        instant.format(time_pattern(DateLength::Short))
    ))
}
