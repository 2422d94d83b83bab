use calocc_test::component::parse::normalize_feed;
use calocc_test::component::{OccurrenceEngine, RfcError};
use chrono_tz::Tz;

use super::helpers::{FeedBuilder, at, resolve, starts};

#[test_log::test]
fn empty_feed_yields_nothing() {
    let engine = OccurrenceEngine::new(Tz::UTC);
    for feed in ["", "\r\n", "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n"] {
        let occurrences = engine
            .resolve_occurrences(feed, at("2024-01-01T00:00:00Z"))
            .unwrap();
        assert!(occurrences.is_empty());
    }
}

#[test_log::test]
fn garbage_feed_never_panics() {
    let engine = OccurrenceEngine::new(Tz::UTC);
    let garbage = "BEGIN:VEVENT\r\nthis is not\r\nan ics file\r\n";

    // Normalization passes unbalanced text through untouched.
    assert_eq!(normalize_feed(garbage), garbage);

    match engine.resolve_occurrences(garbage, at("2024-01-01T00:00:00Z")) {
        Ok(occurrences) => assert!(occurrences.is_empty()),
        Err(err) => assert!(matches!(err, RfcError::ParseError(_)), "{err}"),
    }
}

#[test_log::test]
fn one_bad_event_does_not_spoil_the_feed() {
    let feed = FeedBuilder::new()
        .event(&["UID:no-start@calocc.test", "SUMMARY:No start"])
        .event(&[
            "UID:bad-date@calocc.test",
            "SUMMARY:Bad date",
            "DTSTART:2024-01-05 10:00",
        ])
        .event(&[
            "UID:bad-rule@calocc.test",
            "SUMMARY:Bad rule",
            "DTSTART:20240105T100000Z",
            "RRULE:FREQ=DAILY;INTERVAL=banana",
        ])
        .event(&[
            "UID:good@calocc.test",
            "SUMMARY:Good",
            "DTSTART:20240105T120000Z",
            "DTEND:20240105T130000Z",
        ])
        .build();
    let occurrences = resolve(&feed, Tz::UTC, "2024-01-05T00:00:00Z");

    let summaries: Vec<_> = occurrences.iter().map(|o| o.summary.as_str()).collect();
    assert_eq!(summaries, vec!["Bad rule", "Good"]);
}

#[test_log::test]
fn byte_order_mark_does_not_sink_the_feed() {
    let feed = FeedBuilder::new()
        .event(&[
            "UID:bom@calocc.test",
            "SUMMARY:Exported from Outlook",
            "DTSTART;TZID=Romance Standard Time:20240105T120000",
            "DTEND;TZID=Romance Standard Time:20240105T130000",
            "RRULE:FREQ=DAILY;COUNT=2",
        ])
        .build();
    let occurrences = resolve(&format!("\u{feff}{feed}"), Tz::UTC, "2024-01-06T00:00:00Z");

    assert_eq!(
        starts(&occurrences),
        vec!["2024-01-05T11:00:00+00:00", "2024-01-06T11:00:00+00:00"]
    );
}

#[test_log::test]
fn orphan_override_is_kept() {
    let feed = FeedBuilder::new()
        .event(&[
            "UID:orphan@calocc.test",
            "RECURRENCE-ID:20240110T100000Z",
            "SUMMARY:Moved instance",
            "DTSTART:20240110T140000Z",
            "DTEND:20240110T150000Z",
        ])
        .build();
    let occurrences = resolve(&feed, Tz::UTC, "2024-01-10T00:00:00Z");

    assert_eq!(starts(&occurrences), vec!["2024-01-10T14:00:00+00:00"]);
    assert_eq!(occurrences[0].summary, "Moved instance");
}

#[test_log::test]
fn escaped_text_and_folded_lines() {
    let feed = FeedBuilder::new()
        .event(&[
            "UID:text@calocc.test",
            "SUMMARY:Budget\\; Q3\\, final review",
            "LOCATION:Building 4\\, room 2",
            "DTSTART:20240105T120000Z",
        ])
        .build()
        .replace("final review", "final\r\n  review");
    let occurrences = resolve(&feed, Tz::UTC, "2024-01-05T00:00:00Z");

    assert_eq!(occurrences[0].summary, "Budget; Q3, final review");
    assert_eq!(occurrences[0].location, "Building 4, room 2");
}

#[test_log::test]
fn missing_end_defaults_to_start() {
    let feed = FeedBuilder::new()
        .event(&["UID:point@calocc.test", "SUMMARY:Reminder", "DTSTART:20240105T120000Z"])
        .build();
    let occurrences = resolve(&feed, Tz::UTC, "2024-01-05T00:00:00Z");

    assert_eq!(occurrences[0].end, occurrences[0].start);
    assert!(occurrences[0].is_active_at(occurrences[0].start));
}

#[test_log::test]
fn output_serializes_as_json() {
    let feed = FeedBuilder::new()
        .event(&[
            "UID:json@calocc.test",
            "SUMMARY:Lunch",
            "LOCATION:Canteen",
            "DTSTART:20240105T120000Z",
            "DTEND:20240105T130000Z",
        ])
        .build();
    let occurrences = resolve(&feed, Tz::UTC, "2024-01-05T00:00:00Z");

    let value = serde_json::to_value(&occurrences).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "summary": "Lunch",
            "location": "Canteen",
            "start": "2024-01-05T12:00:00Z",
            "end": "2024-01-05T13:00:00Z",
            "is_all_day": false,
        }])
    );
}
