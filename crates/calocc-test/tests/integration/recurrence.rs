use chrono_tz::Tz;

use super::helpers::{FeedBuilder, at, resolve, starts};

fn weekly_paris_series() -> FeedBuilder {
    FeedBuilder::new().event(&[
        "UID:weekly-paris@calocc.test",
        "SUMMARY:Weekly review",
        "LOCATION:Salle 3",
        "DTSTART;TZID=Europe/Paris:20240318T100000",
        "DTEND;TZID=Europe/Paris:20240318T110000",
        "RRULE:FREQ=WEEKLY;BYDAY=MO",
    ])
}

#[test_log::test]
fn weekly_series_keeps_wall_clock_across_spring_forward() {
    let feed = weekly_paris_series().build();
    let occurrences = resolve(&feed, Tz::UTC, "2024-04-08T12:00:00Z");

    // Paris moves from +01:00 to +02:00 on 2024-03-31.
    assert_eq!(
        starts(&occurrences),
        vec![
            "2024-03-18T09:00:00+00:00",
            "2024-03-25T09:00:00+00:00",
            "2024-04-01T08:00:00+00:00",
            "2024-04-08T08:00:00+00:00",
        ]
    );
    assert!(
        occurrences
            .iter()
            .all(|o| o.end - o.start == chrono::TimeDelta::hours(1))
    );
}

#[test_log::test]
fn excluded_dates_never_appear() {
    let feed = FeedBuilder::new()
        .event(&[
            "UID:weekly-paris@calocc.test",
            "SUMMARY:Weekly review",
            "DTSTART;TZID=Europe/Paris:20240318T100000",
            "DTEND;TZID=Europe/Paris:20240318T110000",
            "RRULE:FREQ=WEEKLY;BYDAY=MO",
            "EXDATE;TZID=Europe/Paris:20240325T100000",
            "EXDATE;TZID=Europe/Paris:20240408T100000",
        ])
        .build();
    let occurrences = resolve(&feed, Tz::UTC, "2024-04-15T12:00:00Z");

    assert_eq!(
        starts(&occurrences),
        vec![
            "2024-03-18T09:00:00+00:00",
            "2024-04-01T08:00:00+00:00",
            "2024-04-15T08:00:00+00:00",
        ]
    );
}

#[test_log::test]
fn override_replaces_its_date_exactly_once() {
    let feed = weekly_paris_series()
        .event(&[
            "UID:weekly-paris@calocc.test",
            "RECURRENCE-ID;TZID=Europe/Paris:20240325T100000",
            "SUMMARY:Weekly review (moved)",
            "LOCATION:Salle 1",
            "DTSTART;TZID=Europe/Paris:20240326T150000",
            "DTEND;TZID=Europe/Paris:20240326T160000",
        ])
        .build();
    let occurrences = resolve(&feed, Tz::UTC, "2024-04-01T12:00:00Z");

    assert_eq!(
        starts(&occurrences),
        vec![
            "2024-03-18T09:00:00+00:00",
            "2024-03-26T14:00:00+00:00",
            "2024-04-01T08:00:00+00:00",
        ]
    );
    let moved = &occurrences[1];
    assert_eq!(moved.summary, "Weekly review (moved)");
    assert_eq!(moved.location, "Salle 1");
    assert_eq!(
        occurrences
            .iter()
            .filter(|o| o.summary == "Weekly review (moved)")
            .count(),
        1
    );
}

#[test_log::test]
fn cancelled_and_moved_occurrences_together() {
    let feed = weekly_paris_series()
        .event(&[
            "UID:weekly-paris@calocc.test",
            "RECURRENCE-ID;TZID=Europe/Paris:20240401T100000",
            "SUMMARY:Weekly review",
            "DTSTART;TZID=Europe/Paris:20240401T120000",
            "DTEND;TZID=Europe/Paris:20240401T130000",
        ])
        .build()
        .replace(
            "RRULE:FREQ=WEEKLY;BYDAY=MO\r\n",
            "RRULE:FREQ=WEEKLY;BYDAY=MO\r\nEXDATE;TZID=Europe/Paris:20240325T100000\r\n",
        );
    let occurrences = resolve(&feed, Tz::UTC, "2024-04-01T12:00:00Z");

    assert_eq!(
        starts(&occurrences),
        vec!["2024-03-18T09:00:00+00:00", "2024-04-01T10:00:00+00:00"]
    );
}

#[test_log::test]
fn open_ended_series_is_bounded_by_lookahead() {
    let feed = weekly_paris_series().build();
    for now in [
        "2024-03-24T00:00:00Z",
        "2024-06-01T00:00:00Z",
        "2026-01-01T00:00:00Z",
    ] {
        let limit = at(now) + chrono::TimeDelta::days(1);
        let occurrences = resolve(&feed, Tz::UTC, now);
        assert!(!occurrences.is_empty());
        assert!(occurrences.iter().all(|o| o.start <= limit), "{now}");
    }
}

#[test_log::test]
fn long_running_series_keeps_current_occurrence() {
    let feed = FeedBuilder::new()
        .event(&[
            "UID:standup-2010@calocc.test",
            "SUMMARY:Standup",
            "DTSTART:20100104T090000Z",
            "DTEND:20100104T091500Z",
            "RRULE:FREQ=DAILY",
        ])
        .build();
    let now = "2026-01-05T09:05:00Z";
    let occurrences = resolve(&feed, Tz::UTC, now);

    let active: Vec<_> = occurrences
        .iter()
        .filter(|o| o.is_active_at(at(now)))
        .collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].start, at("2026-01-05T09:00:00Z"));
    assert_eq!(
        occurrences.last().map(|o| o.start),
        Some(at("2026-01-06T09:00:00Z"))
    );
}

#[test_log::test]
fn count_limited_series_stops_at_count() {
    let feed = FeedBuilder::new()
        .event(&[
            "UID:count@calocc.test",
            "SUMMARY:Onboarding",
            "DTSTART:20240101T090000Z",
            "DURATION:PT2H",
            "RRULE:FREQ=DAILY;COUNT=3",
        ])
        .build();
    let occurrences = resolve(&feed, Tz::UTC, "2024-06-01T00:00:00Z");

    assert_eq!(
        starts(&occurrences),
        vec![
            "2024-01-01T09:00:00+00:00",
            "2024-01-02T09:00:00+00:00",
            "2024-01-03T09:00:00+00:00",
        ]
    );
    assert!(
        occurrences
            .iter()
            .all(|o| o.end - o.start == chrono::TimeDelta::hours(2))
    );
}

#[test_log::test]
fn series_starting_in_the_future_has_no_occurrences_yet() {
    let feed = weekly_paris_series().build();
    assert!(resolve(&feed, Tz::UTC, "2024-03-01T00:00:00Z").is_empty());
}
