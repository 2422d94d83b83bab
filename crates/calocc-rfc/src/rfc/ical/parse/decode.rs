//! Feed text to [`RawCalendarComponent`]s (RFC 5545 §3.6.1).
//!
//! Lexing, unfolding and parameter splitting are left to the `icalendar`
//! parser; this module only maps `VEVENT` properties onto the resolution data
//! model and groups `RECURRENCE-ID` blocks under their series.

use std::collections::HashMap;

use icalendar::parser::{Component, Property, read_calendar, unfold};

use super::values::{DateOrDateTime, parse_date_or_datetime, parse_duration, unescape_text};
use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::{DateKey, RawCalendarComponent, TimezoneTag, WallClockTimestamp};
use crate::rfc::ical::expand::TimestampCorrector;

/// A decoded `VEVENT`.
enum DecodedEvent {
    Series(RawCalendarComponent),
    Override {
        key: DateKey,
        component: RawCalendarComponent,
    },
}

/// ## Summary
/// Decodes every `VEVENT` in `text`.
///
/// Override blocks are attached to the series with the same `UID`; an
/// override whose series is missing is returned as a standalone component.
/// Exception and override dates are keyed through `corrector`.
///
/// ## Errors
/// Returns `RfcError::ParseError` if the text is not iCalendar at all.
/// Events that cannot be placed in time are logged and skipped.
pub fn decode_components(
    text: &str,
    corrector: &TimestampCorrector,
) -> RfcResult<Vec<RawCalendarComponent>> {
    // Windows producers often lead with a byte order mark.
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let unfolded = unfold(text);
    let calendar = read_calendar(&unfolded).map_err(|err| RfcError::ParseError(err.to_string()))?;

    let mut vevents = Vec::new();
    collect_vevents(&calendar.components, &mut vevents);

    let mut series: Vec<RawCalendarComponent> = Vec::with_capacity(vevents.len());
    let mut series_by_uid: HashMap<String, usize> = HashMap::new();
    let mut overrides = Vec::new();

    for vevent in vevents {
        match decode_event(vevent, corrector) {
            Ok(DecodedEvent::Series(component)) => {
                // A UID may repeat; the block with a rule owns the overrides.
                let owns_overrides = series_by_uid
                    .get(&component.uid)
                    .and_then(|&existing| series.get(existing))
                    .is_none_or(|existing| !existing.is_recurring() && component.is_recurring());
                if owns_overrides {
                    series_by_uid.insert(component.uid.clone(), series.len());
                }
                series.push(component);
            }
            Ok(DecodedEvent::Override { key, component }) => overrides.push((key, component)),
            Err(err) => {
                let uid = find_prop(vevent, "UID").map(|p| p.val.to_string());
                tracing::warn!(uid = ?uid, error = %err, "Skipping undecodable VEVENT");
            }
        }
    }

    let mut orphans = Vec::new();
    for (key, component) in overrides {
        let parent = series_by_uid
            .get(&component.uid)
            .and_then(|&index| series.get_mut(index));
        match parent {
            Some(parent) => {
                parent.date_overrides.insert(key, component);
            }
            None => {
                tracing::debug!(
                    uid = %component.uid,
                    date = %key,
                    "Override without a series, keeping it as a single event"
                );
                orphans.push(component);
            }
        }
    }
    series.extend(orphans);

    tracing::debug!(count = series.len(), "Decoded calendar components");
    Ok(series)
}

fn collect_vevents<'a, 'b>(components: &'b [Component<'a>], out: &mut Vec<&'b Component<'a>>) {
    for component in components {
        if component.name.as_ref().eq_ignore_ascii_case("VEVENT") {
            out.push(component);
        } else {
            collect_vevents(&component.components, out);
        }
    }
}

fn decode_event(vevent: &Component<'_>, corrector: &TimestampCorrector) -> RfcResult<DecodedEvent> {
    let uid = find_prop(vevent, "UID")
        .map(|p| p.val.to_string())
        .unwrap_or_default();
    let summary = text_prop(vevent, "SUMMARY");
    let location = text_prop(vevent, "LOCATION");

    let start = find_prop(vevent, "DTSTART")
        .ok_or_else(|| RfcError::ParseError(format!("VEVENT {uid:?} has no DTSTART")))
        .and_then(parse_timestamp)?;

    let mut component = RawCalendarComponent::new(uid, summary, start);
    component.location = location;
    component.end = decode_end(vevent, &component.start);

    if let Some(recurrence_id) = find_prop(vevent, "RECURRENCE-ID") {
        let key = corrector.date_key(&parse_timestamp(recurrence_id)?);
        return Ok(DecodedEvent::Override { key, component });
    }

    component.recurrence_rule = find_prop(vevent, "RRULE")
        .map(|p| p.val.as_ref().trim().to_string())
        .filter(|rule| !rule.is_empty());

    for exdate in props(vevent, "EXDATE") {
        for timestamp in parse_timestamp_list(exdate) {
            component.excluded_dates.insert(corrector.date_key(&timestamp));
        }
    }

    Ok(DecodedEvent::Series(component))
}

/// DTEND, or DTSTART + DURATION. Bad values leave the end open.
fn decode_end(vevent: &Component<'_>, start: &WallClockTimestamp) -> Option<WallClockTimestamp> {
    if let Some(dtend) = find_prop(vevent, "DTEND") {
        return parse_timestamp(dtend)
            .inspect_err(|err| tracing::warn!(error = %err, "Ignoring invalid DTEND"))
            .ok();
    }

    let duration = find_prop(vevent, "DURATION")?;
    let delta = parse_duration(duration.val.as_ref())
        .inspect_err(|err| tracing::warn!(error = %err, "Ignoring invalid DURATION"))
        .ok()?;
    start
        .value
        .checked_add_signed(delta)
        .map(|value| start.with_value(value))
}

fn parse_timestamp(prop: &Property<'_>) -> RfcResult<WallClockTimestamp> {
    let tzid = tzid_param(prop);
    timestamp_from_value(prop.val.as_ref(), tzid.as_deref())
}

/// Comma-separated date/time lists, as used by EXDATE. Bad entries are skipped.
fn parse_timestamp_list(prop: &Property<'_>) -> Vec<WallClockTimestamp> {
    let tzid = tzid_param(prop);
    prop.val
        .as_ref()
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .filter_map(|value| {
            timestamp_from_value(value, tzid.as_deref())
                .inspect_err(|err| tracing::warn!(error = %err, "Ignoring invalid EXDATE value"))
                .ok()
        })
        .collect()
}

fn timestamp_from_value(value: &str, tzid: Option<&str>) -> RfcResult<WallClockTimestamp> {
    Ok(match parse_date_or_datetime(value)? {
        DateOrDateTime::Date(date) => {
            WallClockTimestamp::date(date).with_tag(TimezoneTag::from_parts(tzid, false))
        }
        DateOrDateTime::DateTime { value, is_utc } => WallClockTimestamp {
            value,
            is_date_only: false,
            timezone_tag: TimezoneTag::from_parts(tzid, is_utc),
        },
    })
}

/// The TZID parameter with any surrounding quotes removed.
fn tzid_param(prop: &Property<'_>) -> Option<String> {
    prop.params
        .iter()
        .find(|param| param.key.as_ref().eq_ignore_ascii_case("TZID"))
        .and_then(|param| param.val.as_ref())
        .map(|val| val.as_ref().trim().trim_matches('"').trim().to_string())
        .filter(|tzid| !tzid.is_empty())
}

fn find_prop<'c, 'a>(component: &'c Component<'a>, name: &str) -> Option<&'c Property<'a>> {
    component
        .properties
        .iter()
        .find(|prop| prop.name.as_ref().eq_ignore_ascii_case(name))
}

fn props<'c, 'a>(
    component: &'c Component<'a>,
    name: &'c str,
) -> impl Iterator<Item = &'c Property<'a>> + 'c {
    component
        .properties
        .iter()
        .filter(move |prop| prop.name.as_ref().eq_ignore_ascii_case(name))
}

fn text_prop(component: &Component<'_>, name: &str) -> String {
    find_prop(component, name)
        .map(|prop| unescape_text(prop.val.as_ref()))
        .unwrap_or_default()
}
