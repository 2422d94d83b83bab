//! Occurrence window expansion.
//!
//! A recurring event is expanded from its own first start up to
//! `now + lookahead`, so an occurrence already running at `now` is kept and
//! open-ended rules stay bounded. Rule dates for excluded or overridden days
//! are dropped; overrides are appended as they are.

use std::collections::VecDeque;

use chrono::{DateTime, TimeDelta, Utc};

use super::correct::TimestampCorrector;
use super::local_as_utc::{from_local_as_utc_encoding, to_local_as_utc_encoding};
use super::rule::correct_rule;
use crate::rfc::ical::core::{OccurrenceCandidate, RawCalendarComponent};

/// The span recurring events are expanded over.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionWindow {
    pub now: DateTime<Utc>,
    pub lookahead: TimeDelta,
    /// Upper bound on rule dates kept for one event. The latest dates win.
    pub max_occurrences: u16,
}

impl ExpansionWindow {
    #[must_use]
    pub const fn new(now: DateTime<Utc>, lookahead: TimeDelta, max_occurrences: u16) -> Self {
        Self {
            now,
            lookahead,
            max_occurrences,
        }
    }
}

/// ## Summary
/// Expands one component into its occurrence candidates inside `window`.
///
/// Non-recurring components yield themselves. A component whose rule cannot
/// be corrected or built is treated as non-recurring.
#[must_use]
pub fn expand_occurrences(
    event: &RawCalendarComponent,
    window: &ExpansionWindow,
    corrector: &TimestampCorrector,
) -> Vec<OccurrenceCandidate> {
    let Some(raw_rule) = event.recurrence_rule.as_deref() else {
        return vec![OccurrenceCandidate::from_component(event)];
    };

    let rule = match correct_rule(raw_rule, &event.start, corrector) {
        Ok(rule) => rule,
        Err(err) => {
            tracing::warn!(
                uid = %event.uid,
                rrule = %raw_rule,
                error = %err,
                "Unusable recurrence rule, treating event as a single occurrence"
            );
            return vec![OccurrenceCandidate::from_component(event)];
        }
    };

    let window_end = to_local_as_utc_encoding(
        corrector.local_wall_clock(window.now) + window.lookahead,
    );

    if window_end < rule.dtstart {
        tracing::trace!(uid = %event.uid, "Series starts after the window");
        return accepted_overrides(event, corrector).collect();
    }

    let limit = usize::from(window.max_occurrences);
    let start_date = event.start.date_naive();
    let mut kept = VecDeque::with_capacity(limit.min(64));
    let mut dropped = 0_usize;

    // The set iterates from DTSTART onwards; the window end is inclusive.
    let set = rule.into_set();
    for generated in &set {
        if generated > window_end {
            break;
        }
        let wall_clock = from_local_as_utc_encoding(&generated);
        let key = corrector.date_key(&event.start.with_value(wall_clock));

        if event.excluded_dates.contains(&key) {
            tracing::trace!(uid = %event.uid, date = %key, "Skipping excluded date");
            continue;
        }
        if event.date_overrides.contains_key(&key) {
            tracing::trace!(uid = %event.uid, date = %key, "Skipping overridden date");
            continue;
        }

        if kept.len() == limit {
            kept.pop_front();
            dropped += 1;
        }
        let offset_days = (wall_clock.date() - start_date).num_days();
        kept.push_back(OccurrenceCandidate::shifted(event, offset_days));
    }

    if dropped > 0 {
        tracing::warn!(
            uid = %event.uid,
            limit = window.max_occurrences,
            dropped,
            "Recurrence expansion hit the occurrence limit, keeping the latest dates"
        );
    }

    let mut candidates = Vec::from(kept);
    candidates.extend(accepted_overrides(event, corrector));
    candidates
}

/// Overrides dated on or after the series' own start date.
fn accepted_overrides<'e>(
    event: &'e RawCalendarComponent,
    corrector: &TimestampCorrector,
) -> impl Iterator<Item = OccurrenceCandidate> + 'e {
    let series_start = corrector.date_key(&event.start);
    event
        .date_overrides
        .iter()
        .filter(move |(key, _)| {
            if **key < series_start {
                tracing::debug!(
                    uid = %event.uid,
                    date = %key,
                    series_start = %series_start,
                    "Discarding override dated before its series"
                );
                return false;
            }
            true
        })
        .map(|(_, replacement)| OccurrenceCandidate::from_component(replacement))
}
