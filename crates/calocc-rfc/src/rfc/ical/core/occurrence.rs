use chrono::{DateTime, Utc};
use serde::Serialize;

/// A fully corrected occurrence, handed to rule evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    pub summary: String,
    pub location: String,
    pub start: DateTime<Utc>,
    /// Never before `start`; equal to it when the source had no end.
    pub end: DateTime<Utc>,
    pub is_all_day: bool,
}

impl Occurrence {
    /// ## Summary
    /// Returns whether the occurrence covers `instant`.
    ///
    /// Start is inclusive, end exclusive. A zero-length occurrence is active
    /// exactly at its start.
    #[must_use]
    pub fn is_active_at(&self, instant: DateTime<Utc>) -> bool {
        if self.start == self.end {
            return instant == self.start;
        }
        self.start <= instant && instant < self.end
    }
}
