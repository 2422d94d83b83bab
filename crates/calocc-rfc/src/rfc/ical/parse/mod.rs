//! Feed text handling: normalization, decoding and value parsers.

mod decode;
mod normalize;
mod values;

pub use decode::decode_components;
pub use normalize::normalize_feed;
pub use values::{DateOrDateTime, parse_date_or_datetime, parse_duration, unescape_text};
