//! End-to-end occurrence resolution tests.

mod feeds;
mod recurrence;
mod timezones;
