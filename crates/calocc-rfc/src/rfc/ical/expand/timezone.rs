//! Timezone identifier resolution for feed TZID values.
//!
//! Uses ICU4X for Windows timezone name to IANA mapping and `chrono-tz` as
//! the set of identifiers the date/time library knows.

use std::fmt;

use chrono_tz::Tz;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;

use super::zone_table;

/// Outcome of resolving a TZID: a canonical identifier, or nothing usable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedTimezone {
    Canonical(String),
    Unresolved,
}

impl ResolvedTimezone {
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Canonical(id) => Some(id),
            Self::Unresolved => None,
        }
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Canonical(_))
    }

    /// ## Summary
    /// Returns the concrete zone for this identifier.
    ///
    /// Global-form identifiers may carry a vendor path in front of the zone
    /// name (`mozilla.org/Europe/Paris`); leading segments are dropped one at
    /// a time until a known zone remains.
    #[must_use]
    pub fn to_tz(&self) -> Option<Tz> {
        let mut candidate = self.identifier()?;
        loop {
            if let Ok(tz) = candidate.parse::<Tz>() {
                return Some(tz);
            }
            let (_, rest) = candidate.split_once('/')?;
            candidate = rest;
        }
    }
}

impl fmt::Display for ResolvedTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canonical(id) => f.write_str(id),
            Self::Unresolved => f.write_str("<unresolved>"),
        }
    }
}

/// Resolver for TZID values found in feeds.
///
/// Holds no state: every table it consults is process-wide and read-only, so
/// one resolver can be shared freely between threads and calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimezoneResolver;

impl TimezoneResolver {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// ## Summary
    /// Maps a TZID to a canonical identifier. First match wins:
    /// 1. `/Region/City` global form: the leading slash is stripped
    /// 2. vendor names (Windows zone names, Outlook display labels)
    /// 3. identifiers known to `chrono-tz`, returned verbatim
    ///
    /// Never fails; anything else is `Unresolved`.
    #[must_use]
    pub fn resolve(&self, tzid: &str) -> ResolvedTimezone {
        if let Some(global) = tzid.strip_prefix('/') {
            return ResolvedTimezone::Canonical(global.to_string());
        }

        if let Some(id) = vendor_identifier(tzid) {
            tracing::trace!(tzid = %tzid, resolved = %id, "Resolved vendor timezone name");
            return ResolvedTimezone::Canonical(id);
        }

        if tzid.parse::<Tz>().is_ok() {
            return ResolvedTimezone::Canonical(tzid.to_string());
        }

        tracing::trace!(tzid = %tzid, "Timezone not resolved");
        ResolvedTimezone::Unresolved
    }

    /// Resolves a TZID straight to a `chrono_tz::Tz`.
    #[must_use]
    pub fn resolve_zone(&self, tzid: &str) -> Option<Tz> {
        self.resolve(tzid).to_tz()
    }
}

fn vendor_identifier(tzid: &str) -> Option<String> {
    let name = tzid.trim();
    if name.is_empty() {
        return None;
    }
    if let Some(id) = zone_table::lookup(name) {
        return Some(id.to_string());
    }
    windows_identifier(name)
}

/// Looks up a Windows zone name ("Romance Standard Time") in the CLDR
/// mapping compiled into ICU4X and returns its canonical IANA name.
fn windows_identifier(name: &str) -> Option<String> {
    let windows_parser = WindowsParser::new();
    let tz = windows_parser.parse(name, None)?;

    let iana_parser = IanaParserExtended::new();
    iana_parser
        .iter()
        .find(|entry| entry.time_zone == tz)
        .map(|entry| entry.canonical.to_string())
}
