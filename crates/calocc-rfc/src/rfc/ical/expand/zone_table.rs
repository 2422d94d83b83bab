//! Vendor timezone labels that are not CLDR Windows zone names.
//!
//! Outlook sometimes writes the zone's display label instead of its Windows
//! id into TZID, and Exchange uses a `tzone://` URI for UTC. These need
//! updating when Microsoft renames a label.

use std::collections::HashMap;
use std::sync::LazyLock;

static DISPLAY_LABELS: &[(&str, &str)] = &[
    ("tzone://Microsoft/Utc", "Etc/UTC"),
    ("(UTC) Coordinated Universal Time", "Etc/UTC"),
    ("(UTC) Dublin, Edinburgh, Lisbon, London", "Europe/London"),
    ("(UTC+00:00) Dublin, Edinburgh, Lisbon, London", "Europe/London"),
    ("(UTC+00:00) Monrovia, Reykjavik", "Atlantic/Reykjavik"),
    (
        "(UTC+01:00) Amsterdam, Berlin, Bern, Rome, Stockholm, Vienna",
        "Europe/Berlin",
    ),
    (
        "(UTC+01:00) Belgrade, Bratislava, Budapest, Ljubljana, Prague",
        "Europe/Budapest",
    ),
    ("(UTC+01:00) Brussels, Copenhagen, Madrid, Paris", "Europe/Paris"),
    ("(UTC+01:00) Sarajevo, Skopje, Warsaw, Zagreb", "Europe/Warsaw"),
    ("(UTC+01:00) West Central Africa", "Africa/Lagos"),
    ("(UTC+02:00) Athens, Bucharest", "Europe/Bucharest"),
    ("(UTC+02:00) Cairo", "Africa/Cairo"),
    (
        "(UTC+02:00) Helsinki, Kyiv, Riga, Sofia, Tallinn, Vilnius",
        "Europe/Helsinki",
    ),
    ("(UTC+02:00) Jerusalem", "Asia/Jerusalem"),
    ("(UTC+02:00) Harare, Pretoria", "Africa/Johannesburg"),
    ("(UTC+03:00) Istanbul", "Europe/Istanbul"),
    ("(UTC+03:00) Moscow, St. Petersburg", "Europe/Moscow"),
    ("(UTC+04:00) Abu Dhabi, Muscat", "Asia/Dubai"),
    ("(UTC+05:30) Chennai, Kolkata, Mumbai, New Delhi", "Asia/Kolkata"),
    ("(UTC+07:00) Bangkok, Hanoi, Jakarta", "Asia/Bangkok"),
    ("(UTC+08:00) Beijing, Chongqing, Hong Kong, Urumqi", "Asia/Shanghai"),
    ("(UTC+08:00) Kuala Lumpur, Singapore", "Asia/Singapore"),
    ("(UTC+09:00) Osaka, Sapporo, Tokyo", "Asia/Tokyo"),
    ("(UTC+09:00) Seoul", "Asia/Seoul"),
    ("(UTC+10:00) Canberra, Melbourne, Sydney", "Australia/Sydney"),
    ("(UTC+10:00) Brisbane", "Australia/Brisbane"),
    ("(UTC+12:00) Auckland, Wellington", "Pacific/Auckland"),
    ("(UTC-03:00) Brasilia", "America/Sao_Paulo"),
    ("(UTC-03:00) City of Buenos Aires", "America/Argentina/Buenos_Aires"),
    ("(UTC-04:00) Atlantic Time (Canada)", "America/Halifax"),
    ("(UTC-05:00) Eastern Time (US & Canada)", "America/New_York"),
    ("(UTC-06:00) Central Time (US & Canada)", "America/Chicago"),
    (
        "(UTC-06:00) Guadalajara, Mexico City, Monterrey",
        "America/Mexico_City",
    ),
    ("(UTC-07:00) Arizona", "America/Phoenix"),
    ("(UTC-07:00) Mountain Time (US & Canada)", "America/Denver"),
    ("(UTC-08:00) Pacific Time (US & Canada)", "America/Los_Angeles"),
    ("(UTC-09:00) Alaska", "America/Anchorage"),
    ("(UTC-10:00) Hawaii", "Pacific/Honolulu"),
];

static LABEL_INDEX: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| DISPLAY_LABELS.iter().copied().collect());

/// Looks up a display label, returning its IANA identifier.
pub(super) fn lookup(label: &str) -> Option<&'static str> {
    LABEL_INDEX.get(label).copied()
}
