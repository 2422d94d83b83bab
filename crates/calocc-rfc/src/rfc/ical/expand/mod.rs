//! Occurrence expansion and correction.
//!
//! All rule arithmetic happens on wall-clock values in the local-as-UTC
//! encoding (see [`local_as_utc`]); values are turned into absolute instants
//! only by [`TimestampCorrector`].

mod correct;
pub mod local_as_utc;
mod materialize;
mod rule;
mod timezone;
mod window;
mod zone_table;

pub use correct::TimestampCorrector;
pub use local_as_utc::{format_local_as_utc, from_local_as_utc_encoding, to_local_as_utc_encoding};
pub use materialize::materialize;
pub use rule::{CorrectedRule, correct_rule};
pub use timezone::{ResolvedTimezone, TimezoneResolver};
pub use window::{ExpansionWindow, expand_occurrences};
