//! Command-line front end for the occurrence engine.

pub mod cli;
