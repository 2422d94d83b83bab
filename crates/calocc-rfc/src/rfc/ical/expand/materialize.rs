//! Candidate to output record.

use super::correct::TimestampCorrector;
use crate::rfc::ical::core::{Occurrence, OccurrenceCandidate};

/// ## Summary
/// Corrects a candidate's timestamps and builds the output occurrence.
///
/// A missing end collapses the occurrence onto its start. An end before the
/// start is clamped to the start.
#[must_use]
pub fn materialize(candidate: &OccurrenceCandidate, corrector: &TimestampCorrector) -> Occurrence {
    let start = corrector.correct(&candidate.start);
    let end = candidate
        .end
        .as_ref()
        .map_or(start, |end| corrector.correct(end));

    if end < start {
        tracing::debug!(
            summary = %candidate.summary,
            %start,
            %end,
            "Occurrence ends before it starts, clamping"
        );
    }

    Occurrence {
        summary: candidate.summary.clone(),
        location: candidate.location.clone(),
        start,
        end: end.max(start),
        is_all_day: candidate.start.is_date_only,
    }
}
