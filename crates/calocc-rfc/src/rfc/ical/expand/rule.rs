//! Recurrence rule correction (RFC 5545 §3.3.10).
//!
//! The rule engine works in the local-as-UTC encoding, so both boundaries of
//! a rule are rewritten into it before the rule is built:
//! - DTSTART comes from the event's own wall-clock start, never from the feed
//! - UNTIL is genuine UTC in the feed and is moved onto the event's clock

use chrono::{DateTime, NaiveDateTime, NaiveTime};
use rrule::{RRule, RRuleSet, Unvalidated};

use super::correct::TimestampCorrector;
use super::local_as_utc::{format_local_as_utc, to_local_as_utc_encoding};
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::WallClockTimestamp;
use crate::rfc::ical::parse::{DateOrDateTime, parse_date_or_datetime};

/// A recurrence rule ready for evaluation.
#[derive(Debug, Clone)]
pub struct CorrectedRule {
    /// The RRULE text after UNTIL substitution.
    pub rule_text: String,
    /// The event start in local-as-UTC encoding.
    pub dtstart: DateTime<rrule::Tz>,
    set: RRuleSet,
}

impl CorrectedRule {
    #[must_use]
    pub fn into_set(self) -> RRuleSet {
        self.set
    }
}

/// ## Summary
/// Rewrites a decoded RRULE into the local-as-UTC convention and builds it.
///
/// `raw_rule` is the RRULE value; an `RRULE:` prefix and any DTSTART line a
/// decoder left next to it are tolerated and discarded.
///
/// ## Errors
/// Returns `RfcError::RRuleError` if the rule is empty or the rule engine
/// rejects it, and `RfcError::InvalidDateTime` if UNTIL is not a date or
/// date-time value.
pub fn correct_rule(
    raw_rule: &str,
    start: &WallClockTimestamp,
    corrector: &TimestampCorrector,
) -> RfcResult<CorrectedRule> {
    let body = rule_body(raw_rule)
        .ok_or_else(|| RfcError::RRuleError(format!("Empty recurrence rule: {raw_rule:?}")))?;

    let mut parts = Vec::new();
    for part in body.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('=') {
            Some((name, value)) if name.eq_ignore_ascii_case("UNTIL") => {
                parts.push(format!("UNTIL={}", correct_until(value, start, corrector)?));
            }
            _ => parts.push(part.to_string()),
        }
    }
    let rule_text = parts.join(";");

    let dtstart = to_local_as_utc_encoding(start.value);
    let rule = rule_text
        .parse::<RRule<Unvalidated>>()
        .map_err(|err| RfcError::RRuleError(format!("{rule_text}: {err}")))?;
    let set = rule
        .build(dtstart)
        .map_err(|err| RfcError::RRuleError(format!("{rule_text}: {err}")))?;

    tracing::trace!(raw = %raw_rule, corrected = %rule_text, "Corrected recurrence rule");

    Ok(CorrectedRule {
        rule_text,
        dtstart,
        set,
    })
}

/// Extracts the `FREQ=…` part from whatever the decoder handed over.
fn rule_body(raw_rule: &str) -> Option<&str> {
    raw_rule
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line
                .get(..7)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case("DTSTART"))
        })
        .map(|line| match line.get(..6) {
            Some(prefix) if prefix.eq_ignore_ascii_case("RRULE:") => &line[6..],
            _ => line,
        })
        .find(|line| !line.is_empty())
}

/// Moves an UNTIL value onto the event's clock, in local-as-UTC notation.
fn correct_until(
    value: &str,
    start: &WallClockTimestamp,
    corrector: &TimestampCorrector,
) -> RfcResult<String> {
    let wall_clock = match parse_date_or_datetime(value)? {
        // All-day series: the date is kept, only written as midnight to match DTSTART.
        DateOrDateTime::Date(date) if start.is_date_only => date.and_time(NaiveTime::MIN),
        DateOrDateTime::DateTime { value, .. } if start.is_date_only => value,
        // A DATE bound on a timed series covers that whole day.
        DateOrDateTime::Date(date) => date
            .and_hms_opt(23, 59, 59)
            .unwrap_or_else(|| date.and_time(NaiveTime::MIN)),
        DateOrDateTime::DateTime {
            value,
            is_utc: false,
        } => value,
        DateOrDateTime::DateTime {
            value,
            is_utc: true,
        } => utc_to_wall_clock(value, start, corrector),
    };
    Ok(format_local_as_utc(wall_clock))
}

fn utc_to_wall_clock(
    utc: NaiveDateTime,
    start: &WallClockTimestamp,
    corrector: &TimestampCorrector,
) -> NaiveDateTime {
    let zone = corrector.zone_for(&start.timezone_tag);
    utc.and_utc().with_timezone(&zone).naive_local()
}
