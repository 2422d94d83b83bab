//! Occurrence resolution data model.
//!
//! Raw (decoded, uncorrected) components flow in, corrected `Occurrence`
//! records flow out. Every value is built fresh per resolution pass.

mod component;
mod datetime;
mod occurrence;

pub use component::{OccurrenceCandidate, RawCalendarComponent};
pub use datetime::{DateKey, TimezoneTag, WallClockTimestamp};
pub use occurrence::Occurrence;
