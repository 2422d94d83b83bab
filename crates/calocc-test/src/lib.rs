//! calocc occurrence engine - integration test support.
//!
//! Re-exports the workspace crates so integration tests can use
//! `calocc_test::component` paths.

pub mod component {
    pub use calocc_core::config;
    pub use calocc_core::error::CoreError;
    pub use calocc_rfc::error::{RfcError, RfcResult};
    pub use calocc_rfc::rfc::ical::core;
    pub use calocc_rfc::rfc::ical::expand;
    pub use calocc_rfc::rfc::ical::parse;
    pub use calocc_rfc::{Occurrence, OccurrenceEngine};
}
