//! Timestamp correction: wall-clock values to absolute instants.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use super::timezone::TimezoneResolver;
use crate::rfc::ical::core::{DateKey, TimezoneTag, WallClockTimestamp};

/// Reinterprets decoded wall-clock fields in the zone their tag names.
///
/// `local_zone` is the host ("server") zone. Floating values are read in it,
/// and it stands in for any TZID that cannot be resolved.
#[derive(Debug, Clone, Copy)]
pub struct TimestampCorrector {
    resolver: TimezoneResolver,
    local_zone: Tz,
}

impl TimestampCorrector {
    #[must_use]
    pub const fn new(local_zone: Tz) -> Self {
        Self {
            resolver: TimezoneResolver::new(),
            local_zone,
        }
    }

    #[must_use]
    pub const fn local_zone(&self) -> Tz {
        self.local_zone
    }

    /// ## Summary
    /// Returns the zone whose clock a value with this tag was read from.
    ///
    /// Unresolvable TZIDs fall back to the host zone.
    #[must_use]
    pub fn zone_for(&self, tag: &TimezoneTag) -> Tz {
        match tag {
            TimezoneTag::Utc => Tz::UTC,
            TimezoneTag::Floating => self.local_zone,
            TimezoneTag::Named(tzid) => self.resolver.resolve_zone(tzid).unwrap_or_else(|| {
                tracing::debug!(
                    tzid = %tzid,
                    fallback = %self.local_zone,
                    "Unresolved TZID, reading wall clock in host zone"
                );
                self.local_zone
            }),
        }
    }

    /// ## Summary
    /// Computes the absolute instant of a decoded value.
    ///
    /// Date-only values are never shifted by their tag: they become midnight
    /// on the host clock. UTC values are already absolute. Everything else is
    /// read in [`Self::zone_for`] its tag.
    #[must_use]
    pub fn correct(&self, timestamp: &WallClockTimestamp) -> DateTime<Utc> {
        if timestamp.is_date_only {
            return local_instant(self.local_zone, timestamp.value);
        }
        match &timestamp.timezone_tag {
            TimezoneTag::Utc => timestamp.value.and_utc(),
            tag => local_instant(self.zone_for(tag), timestamp.value),
        }
    }

    /// The exception/override key of a decoded value: the UTC date of its instant.
    #[must_use]
    pub fn date_key(&self, timestamp: &WallClockTimestamp) -> DateKey {
        DateKey::from_instant(&self.correct(timestamp))
    }

    /// What the host clock reads at `instant`.
    #[must_use]
    pub fn local_wall_clock(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.local_zone).naive_local()
    }
}

/// Places a wall-clock time on a zone's timeline.
///
/// Times inside a spring-forward gap move forward an hour; times repeated by
/// a fall-back change take the earlier instant (RFC 5545 §3.3.5).
fn local_instant(zone: Tz, wall_clock: NaiveDateTime) -> DateTime<Utc> {
    match zone.from_local_datetime(&wall_clock) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earlier, _later) => earlier.with_timezone(&Utc),
        LocalResult::None => {
            let shifted = wall_clock
                .checked_add_signed(TimeDelta::hours(1))
                .unwrap_or(wall_clock);
            zone.from_local_datetime(&shifted)
                .earliest()
                .map_or_else(|| wall_clock.and_utc(), |dt| dt.with_timezone(&Utc))
        }
    }
}
