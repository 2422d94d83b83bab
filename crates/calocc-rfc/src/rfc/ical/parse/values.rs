//! Value type parsers for iCalendar (RFC 5545 §3.3).

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::error::{RfcError, RfcResult};

/// A DATE or DATE-TIME value, before any timezone is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrDateTime {
    Date(NaiveDate),
    DateTime { value: NaiveDateTime, is_utc: bool },
}

/// Parses a DATE (`YYYYMMDD`) or DATE-TIME (`YYYYMMDDTHHMMSS[Z]`) value.
///
/// ## Errors
/// Returns `RfcError::InvalidDateTime` if the text is neither form.
pub fn parse_date_or_datetime(s: &str) -> RfcResult<DateOrDateTime> {
    let s = s.trim();
    if s.contains('T') {
        let (text, is_utc) = match s.strip_suffix(['Z', 'z']) {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        // chrono accepts single-digit fields; the iCalendar forms are fixed width
        if text.len() != 15 {
            return Err(RfcError::InvalidDateTime(s.to_string()));
        }
        NaiveDateTime::parse_from_str(text, "%Y%m%dT%H%M%S")
            .map(|value| DateOrDateTime::DateTime { value, is_utc })
            .map_err(|err| RfcError::InvalidDateTime(format!("{s}: {err}")))
    } else {
        if s.len() != 8 {
            return Err(RfcError::InvalidDateTime(s.to_string()));
        }
        NaiveDate::parse_from_str(s, "%Y%m%d")
            .map(DateOrDateTime::Date)
            .map_err(|err| RfcError::InvalidDateTime(format!("{s}: {err}")))
    }
}

/// Parses a DURATION value (RFC 5545 §3.3.6), e.g. `PT1H30M`, `P1D`, `-P2W`.
///
/// ## Errors
/// Returns `RfcError::ParseError` if the text is not a valid duration.
pub fn parse_duration(s: &str) -> RfcResult<TimeDelta> {
    let invalid = || RfcError::ParseError(format!("Invalid duration: {s}"));

    let text = s.trim();
    let (negative, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let text = text.strip_prefix('P').ok_or_else(invalid)?;

    let mut total = TimeDelta::zero();
    let mut in_time = false;
    let mut digits = String::new();
    let mut saw_component = false;

    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if c == 'T' {
            if in_time || !digits.is_empty() {
                return Err(invalid());
            }
            in_time = true;
            continue;
        }

        let n: i64 = digits.parse().map_err(|_err| invalid())?;
        digits.clear();
        let component = match (c, in_time) {
            ('W', false) => TimeDelta::try_weeks(n),
            ('D', false) => TimeDelta::try_days(n),
            ('H', true) => TimeDelta::try_hours(n),
            ('M', true) => TimeDelta::try_minutes(n),
            ('S', true) => TimeDelta::try_seconds(n),
            _ => None,
        }
        .ok_or_else(invalid)?;
        total = total.checked_add(&component).ok_or_else(invalid)?;
        saw_component = true;
    }

    if !digits.is_empty() || !saw_component {
        return Err(invalid());
    }

    Ok(if negative { -total } else { total })
}

/// Unescapes text values (RFC 5545 §3.3.11).
///
/// Escape sequences: \\ \, \; \n \N
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n' | 'N') => result.push('\n'),
                Some(',') => result.push(','),
                Some(';') => result.push(';'),
                Some('\\') | None => result.push('\\'),
                Some(other) => {
                    // Invalid escape, preserve as-is
                    result.push('\\');
                    result.push(other);
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}
