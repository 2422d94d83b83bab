//! Wall-clock timestamps and the date keys derived from them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

/// The timezone identifier attached to a date/time value as written in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimezoneTag {
    /// No TZID and a trailing `Z`: the value is already absolute (UTC).
    Utc,
    /// No TZID (or an empty one) and no `Z`: naive, read in the host zone.
    Floating,
    /// A TZID parameter, verbatim. May be a Windows name, a `/global` id or IANA.
    Named(String),
}

impl TimezoneTag {
    /// Builds a tag from an optional TZID parameter and the UTC designator.
    #[must_use]
    pub fn from_parts(tzid: Option<&str>, is_utc: bool) -> Self {
        match tzid.map(str::trim) {
            _ if is_utc => Self::Utc,
            Some(name) if !name.is_empty() => Self::Named(name.to_string()),
            _ => Self::Floating,
        }
    }

    /// Returns the TZID text for named tags.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Utc | Self::Floating => None,
        }
    }
}

impl fmt::Display for TimezoneTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => f.write_str("UTC"),
            Self::Floating => f.write_str("floating"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// A decoded date/time whose numeric fields are the wall-clock time the feed
/// author intended. Not an absolute instant unless tagged `Utc`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WallClockTimestamp {
    pub value: NaiveDateTime,
    /// All-day marker (`VALUE=DATE`). The time of day is always midnight.
    pub is_date_only: bool,
    pub timezone_tag: TimezoneTag,
}

impl WallClockTimestamp {
    #[must_use]
    pub fn date(date: NaiveDate) -> Self {
        Self {
            value: date.and_time(NaiveTime::MIN),
            is_date_only: true,
            timezone_tag: TimezoneTag::Floating,
        }
    }

    #[must_use]
    pub fn utc(value: NaiveDateTime) -> Self {
        Self {
            value,
            is_date_only: false,
            timezone_tag: TimezoneTag::Utc,
        }
    }

    #[must_use]
    pub fn floating(value: NaiveDateTime) -> Self {
        Self {
            value,
            is_date_only: false,
            timezone_tag: TimezoneTag::Floating,
        }
    }

    #[must_use]
    pub fn zoned(value: NaiveDateTime, tzid: impl Into<String>) -> Self {
        Self {
            value,
            is_date_only: false,
            timezone_tag: TimezoneTag::Named(tzid.into()),
        }
    }

    /// Replaces the timezone tag, keeping the wall-clock fields.
    #[must_use]
    pub fn with_tag(mut self, timezone_tag: TimezoneTag) -> Self {
        self.timezone_tag = timezone_tag;
        self
    }

    /// Same tag and date-only flag, different wall-clock fields.
    #[must_use]
    pub fn with_value(&self, value: NaiveDateTime) -> Self {
        Self {
            value,
            is_date_only: self.is_date_only,
            timezone_tag: self.timezone_tag.clone(),
        }
    }

    /// Moves the wall-clock fields by whole days. Time of day, tag and
    /// date-only flag are kept, so a 09:00 event stays at 09:00 local even
    /// across a DST change.
    #[must_use]
    pub fn shifted_by_days(&self, days: i64) -> Self {
        let value = TimeDelta::try_days(days)
            .and_then(|delta| self.value.checked_add_signed(delta))
            .unwrap_or(self.value);
        self.with_value(value)
    }

    #[must_use]
    pub fn date_naive(&self) -> NaiveDate {
        self.value.date()
    }
}

/// Day-granularity key correlating exceptions and overrides with generated
/// occurrences. Always the UTC calendar date of the timestamp's instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    #[must_use]
    pub fn from_instant(instant: &DateTime<Utc>) -> Self {
        Self(instant.date_naive())
    }

    #[must_use]
    pub const fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self)
    }
}
