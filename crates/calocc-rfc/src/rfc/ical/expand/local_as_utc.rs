//! The "local-as-UTC" encoding used for rule arithmetic.
//!
//! Recurrence dates are computed on wall-clock values written in UTC
//! notation, so `2022-09-16T11:00:00Z` means 11:00 on the event's own clock.
//! A fixed-offset zone never springs forward, so daily and weekly steps keep
//! the wall-clock time across DST changes. Values enter this encoding only
//! when a rule is built and leave it only when its dates are read back.

use chrono::{DateTime, NaiveDateTime};

/// Wall-clock fields re-labelled as UTC, for handing to the rule engine.
#[must_use]
pub fn to_local_as_utc_encoding(wall_clock: NaiveDateTime) -> DateTime<rrule::Tz> {
    wall_clock.and_utc().with_timezone(&rrule::Tz::UTC)
}

/// Inverse of [`to_local_as_utc_encoding`]: the UTC fields are the wall clock.
#[must_use]
pub fn from_local_as_utc_encoding(encoded: &DateTime<rrule::Tz>) -> NaiveDateTime {
    encoded.naive_utc()
}

/// Rule-text form of an encoded value, as used for `UNTIL`.
#[must_use]
pub fn format_local_as_utc(wall_clock: NaiveDateTime) -> String {
    format!("{}Z", wall_clock.format("%Y%m%dT%H%M%S"))
}
