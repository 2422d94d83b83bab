//! RFC 5545 (iCalendar) handling.

pub mod ical;
