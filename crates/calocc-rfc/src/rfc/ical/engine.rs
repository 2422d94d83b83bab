use calocc_core::config::{DEFAULT_LOOKAHEAD_HOURS, DEFAULT_MAX_OCCURRENCES, EngineConfig};
use calocc_core::error::CoreError;
use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;

use super::core::Occurrence;
use super::expand::{
    ExpansionWindow, TimestampCorrector, TimezoneResolver, expand_occurrences, materialize,
};
use super::parse::{decode_components, normalize_feed};
use crate::error::{RfcError, RfcResult};

/// Resolves a feed into the occurrences around a reference instant.
///
/// Holds only immutable settings, so one engine can serve any number of
/// independent and concurrent calls.
#[derive(Debug, Clone, Copy)]
pub struct OccurrenceEngine {
    corrector: TimestampCorrector,
    lookahead: TimeDelta,
    max_occurrences: u16,
}

impl OccurrenceEngine {
    /// Engine for a host clock running in `local_zone`, with a one-day lookahead.
    #[must_use]
    pub fn new(local_zone: Tz) -> Self {
        Self {
            corrector: TimestampCorrector::new(local_zone),
            lookahead: TimeDelta::hours(i64::from(DEFAULT_LOOKAHEAD_HOURS)),
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }

    #[must_use]
    pub const fn with_lookahead(mut self, lookahead: TimeDelta) -> Self {
        self.lookahead = lookahead;
        self
    }

    #[must_use]
    pub const fn with_max_occurrences(mut self, max_occurrences: u16) -> Self {
        self.max_occurrences = max_occurrences;
        self
    }

    /// ## Summary
    /// Builds an engine from configuration.
    ///
    /// The configured local timezone is resolved like a feed TZID, so Windows
    /// names are accepted. Without one, the host zone is detected and UTC is
    /// used if detection fails.
    ///
    /// ## Errors
    /// Returns `RfcError::CoreError` if the configuration is invalid and
    /// `RfcError::UnknownTimezone` if the configured zone cannot be resolved.
    pub fn from_config(config: &EngineConfig) -> RfcResult<Self> {
        config.validate()?;

        let resolver = TimezoneResolver::new();
        let local_zone = match config.local_timezone.as_deref() {
            Some(name) => resolver
                .resolve_zone(name)
                .ok_or_else(|| RfcError::UnknownTimezone(name.to_string()))?,
            None => detect_local_zone(&resolver),
        };

        let lookahead = TimeDelta::try_hours(i64::from(config.lookahead_hours)).ok_or_else(|| {
            CoreError::ConfigError(format!(
                "engine.lookahead_hours out of range: {}",
                config.lookahead_hours
            ))
        })?;

        tracing::debug!(
            local_zone = %local_zone,
            lookahead_hours = config.lookahead_hours,
            max_occurrences = config.max_occurrences,
            "Configured occurrence engine"
        );

        Ok(Self::new(local_zone)
            .with_lookahead(lookahead)
            .with_max_occurrences(config.max_occurrences))
    }

    #[must_use]
    pub const fn local_zone(&self) -> Tz {
        self.corrector.local_zone()
    }

    #[must_use]
    pub const fn lookahead(&self) -> TimeDelta {
        self.lookahead
    }

    /// ## Summary
    /// Resolves every occurrence in `feed_text` from each event's first start
    /// up to `now` plus the lookahead.
    ///
    /// The result is unsorted. Events that cannot be decoded are skipped and
    /// events with an unusable rule count as single occurrences.
    ///
    /// ## Errors
    /// Returns `RfcError::ParseError` if the feed text cannot be decoded at all.
    #[tracing::instrument(skip_all, fields(now = %now, local_zone = %self.local_zone()))]
    pub fn resolve_occurrences(
        &self,
        feed_text: &str,
        now: DateTime<Utc>,
    ) -> RfcResult<Vec<Occurrence>> {
        let normalized = normalize_feed(feed_text);
        let components = decode_components(&normalized, &self.corrector)?;
        let window = ExpansionWindow::new(now, self.lookahead, self.max_occurrences);

        let occurrences: Vec<Occurrence> = components
            .iter()
            .flat_map(|component| expand_occurrences(component, &window, &self.corrector))
            .map(|candidate| materialize(&candidate, &self.corrector))
            .collect();

        tracing::debug!(
            components = components.len(),
            occurrences = occurrences.len(),
            "Resolved occurrences"
        );
        Ok(occurrences)
    }
}

fn detect_local_zone(resolver: &TimezoneResolver) -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(name) => resolver.resolve_zone(&name).unwrap_or_else(|| {
            tracing::warn!(zone = %name, "Host timezone not recognised, using UTC");
            Tz::UTC
        }),
        Err(err) => {
            tracing::warn!(error = %err, "Could not detect host timezone, using UTC");
            Tz::UTC
        }
    }
}
