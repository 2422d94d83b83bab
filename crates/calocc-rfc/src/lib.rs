//! Calendar occurrence resolution.
//!
//! Turns raw iCalendar feed text plus a reference instant into the concrete
//! event occurrences around that instant: recurring events are expanded,
//! exceptions and per-date overrides applied, and wall-clock values tagged
//! with vendor timezone identifiers converted into absolute instants.

pub mod error;
pub mod rfc;

pub use rfc::ical::OccurrenceEngine;
pub use rfc::ical::core::Occurrence;
