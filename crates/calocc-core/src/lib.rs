//! Shared configuration and error types for the calocc workspace.

pub mod config;
pub mod error;
