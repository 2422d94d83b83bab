//! iCalendar occurrence resolution.
//!
//! Pipeline, leaves first:
//! - `parse::normalize_feed`: reorders event blocks, recurring ones first
//! - `parse::decode_components`: feed text to `RawCalendarComponent`s
//! - `expand`: timezone resolution, rule correction, window expansion,
//!   timestamp correction and materialization
//! - `OccurrenceEngine`: runs the pipeline for one feed and one instant

pub mod core;
mod engine;
pub mod expand;
pub mod parse;


pub use engine::OccurrenceEngine;
