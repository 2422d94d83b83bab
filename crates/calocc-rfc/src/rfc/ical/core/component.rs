//! Decoded event records (RFC 5545 §3.6.1 VEVENT, reduced to what resolution needs).

use std::collections::{BTreeMap, BTreeSet};

use super::{DateKey, WallClockTimestamp};

/// A decoded but uncorrected VEVENT.
///
/// `date_overrides` holds the `RECURRENCE-ID` blocks that replace single
/// occurrences of this event's series, keyed the same way as `excluded_dates`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCalendarComponent {
    pub uid: String,
    pub summary: String,
    pub location: String,
    pub start: WallClockTimestamp,
    pub end: Option<WallClockTimestamp>,
    /// RRULE value as written, e.g. `FREQ=WEEKLY;BYDAY=MO`.
    pub recurrence_rule: Option<String>,
    pub excluded_dates: BTreeSet<DateKey>,
    pub date_overrides: BTreeMap<DateKey, RawCalendarComponent>,
}

impl RawCalendarComponent {
    /// Creates a non-recurring component with no end.
    #[must_use]
    pub fn new(
        uid: impl Into<String>,
        summary: impl Into<String>,
        start: WallClockTimestamp,
    ) -> Self {
        Self {
            uid: uid.into(),
            summary: summary.into(),
            location: String::new(),
            start,
            end: None,
            recurrence_rule: None,
            excluded_dates: BTreeSet::new(),
            date_overrides: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn is_recurring(&self) -> bool {
        self.recurrence_rule.is_some()
    }
}

/// One occurrence before timestamp correction: either the event itself, a
/// rule-generated date shifted from it, or an override taken verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct OccurrenceCandidate {
    pub summary: String,
    pub location: String,
    pub start: WallClockTimestamp,
    pub end: Option<WallClockTimestamp>,
}

impl OccurrenceCandidate {
    #[must_use]
    pub fn from_component(component: &RawCalendarComponent) -> Self {
        Self {
            summary: component.summary.clone(),
            location: component.location.clone(),
            start: component.start.clone(),
            end: component.end.clone(),
        }
    }

    /// The component moved by whole days, as generated by its rule.
    #[must_use]
    pub fn shifted(component: &RawCalendarComponent, days: i64) -> Self {
        Self {
            summary: component.summary.clone(),
            location: component.location.clone(),
            start: component.start.shifted_by_days(days),
            end: component.end.as_ref().map(|end| end.shifted_by_days(days)),
        }
    }
}
