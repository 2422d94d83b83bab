use calocc_test::component::expand::{ResolvedTimezone, TimezoneResolver};
use chrono_tz::Tz;

use super::helpers::{FeedBuilder, resolve, starts};

fn single(tzid_param: &str, start: &str, end: &str) -> String {
    FeedBuilder::new()
        .event(&[
            "UID:tz@calocc.test",
            "SUMMARY:Call",
            &format!("DTSTART{tzid_param}:{start}"),
            &format!("DTEND{tzid_param}:{end}"),
        ])
        .build()
}

#[test_log::test]
fn outlook_display_label_is_resolved() {
    let feed = single(
        ";TZID=\"(UTC+01:00) Brussels, Copenhagen, Madrid, Paris\"",
        "20240115T090000",
        "20240115T100000",
    );
    let occurrences = resolve(&feed, Tz::UTC, "2024-01-15T00:00:00Z");
    assert_eq!(starts(&occurrences), vec!["2024-01-15T08:00:00+00:00"]);
}

#[test_log::test]
fn windows_zone_names_from_several_regions() {
    let cases = [
        ("Eastern Standard Time", "2024-01-15T14:00:00+00:00"),
        ("Pacific Standard Time", "2024-01-15T17:00:00+00:00"),
        ("GMT Standard Time", "2024-01-15T09:00:00+00:00"),
        ("Tokyo Standard Time", "2024-01-15T00:00:00+00:00"),
        ("AUS Eastern Standard Time", "2024-01-14T22:00:00+00:00"),
    ];
    for (tzid, expected) in cases {
        let feed = single(&format!(";TZID={tzid}"), "20240115T090000", "20240115T100000");
        let occurrences = resolve(&feed, Tz::UTC, "2024-01-15T00:00:00Z");
        assert_eq!(starts(&occurrences), vec![expected], "{tzid}");
    }
}

#[test_log::test]
fn unresolved_zone_falls_back_to_host_zone() {
    let feed = single(";TZID=Customized Time Zone", "20240115T090000", "20240115T100000");

    let in_utc = resolve(&feed, Tz::UTC, "2024-01-15T00:00:00Z");
    let in_berlin = resolve(&feed, Tz::Europe__Berlin, "2024-01-15T00:00:00Z");

    assert_eq!(starts(&in_utc), vec!["2024-01-15T09:00:00+00:00"]);
    assert_eq!(starts(&in_berlin), vec!["2024-01-15T08:00:00+00:00"]);
}

#[test_log::test]
fn floating_time_is_read_on_host_clock() {
    let feed = single("", "20240715T090000", "20240715T100000");
    let occurrences = resolve(&feed, Tz::America__New_York, "2024-07-15T00:00:00Z");
    assert_eq!(starts(&occurrences), vec!["2024-07-15T13:00:00+00:00"]);
}

#[test_log::test]
fn utc_time_ignores_host_zone() {
    let feed = single("", "20240715T090000Z", "20240715T100000Z");
    for zone in [Tz::UTC, Tz::Asia__Kolkata, Tz::America__Denver] {
        let occurrences = resolve(&feed, zone, "2024-07-15T00:00:00Z");
        assert_eq!(starts(&occurrences), vec!["2024-07-15T09:00:00+00:00"]);
    }
}

#[test_log::test]
fn recurring_series_in_unresolved_zone_uses_host_clock_for_until() {
    let feed = FeedBuilder::new()
        .event(&[
            "UID:custom@calocc.test",
            "SUMMARY:Custom zone",
            "DTSTART;TZID=Customized Time Zone:20240108T090000",
            "DTEND;TZID=Customized Time Zone:20240108T093000",
            // 09:00 in Berlin on the 10th
            "RRULE:FREQ=DAILY;UNTIL=20240110T080000Z",
        ])
        .build();
    let occurrences = resolve(&feed, Tz::Europe__Berlin, "2024-02-01T00:00:00Z");

    assert_eq!(
        starts(&occurrences),
        vec![
            "2024-01-08T08:00:00+00:00",
            "2024-01-09T08:00:00+00:00",
            "2024-01-10T08:00:00+00:00",
        ]
    );
}

#[test]
fn resolver_order() {
    let resolver = TimezoneResolver::new();

    assert_eq!(
        resolver.resolve("/America/Chicago"),
        ResolvedTimezone::Canonical("America/Chicago".to_string())
    );
    assert_eq!(
        resolver.resolve("Central Standard Time").identifier(),
        Some("America/Chicago")
    );
    assert_eq!(
        resolver.resolve("America/Chicago").identifier(),
        Some("America/Chicago")
    );
    assert_eq!(resolver.resolve("Atlantis"), ResolvedTimezone::Unresolved);
}
