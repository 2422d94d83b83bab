use anyhow::Result;
use config::{Config, ConfigBuilder, builder::DefaultState};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

/// Hours past "now" that recurrence expansion looks ahead by default.
pub const DEFAULT_LOOKAHEAD_HOURS: u32 = 24;

/// Per-event cap on the number of rule dates kept; the latest dates are kept.
pub const DEFAULT_MAX_OCCURRENCES: u16 = 4096;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Name of the optional TOML file read from the working directory.
pub const CONFIG_FILE_NAME: &str = "calocc.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub lookahead_hours: u32,
    pub max_occurrences: u16,
    /// Zone the host clock runs in. Detected from the platform when absent.
    pub local_timezone: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lookahead_hours: DEFAULT_LOOKAHEAD_HOURS,
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
            local_timezone: None,
        }
    }
}

impl EngineConfig {
    /// ## Summary
    /// Checks the engine limits for values the expander cannot work with.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if `max_occurrences` is zero or the
    /// configured local timezone is blank.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_occurrences == 0 {
            return Err(CoreError::ConfigError(
                "engine.max_occurrences must be at least 1".to_string(),
            ));
        }
        if self
            .local_timezone
            .as_deref()
            .is_some_and(|tz| tz.trim().is_empty())
        {
            return Err(CoreError::ConfigError(
                "engine.local_timezone must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>> {
    Ok(Config::builder()
        .set_default("engine.lookahead_hours", i64::from(DEFAULT_LOOKAHEAD_HOURS))?
        .set_default("engine.max_occurrences", i64::from(DEFAULT_MAX_OCCURRENCES))?
        .set_default("logging.level", DEFAULT_LOG_LEVEL)?)
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `calocc.toml` (optional) and `CALOCC__*`
    /// environment variables. Environment variables take precedence.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let settings = builder_with_defaults()?
            // TOML file
            .add_source(config::File::with_name(CONFIG_FILE_NAME).required(false))
            // Env, e.g. CALOCC__ENGINE__LOOKAHEAD_HOURS=48
            .add_source(
                config::Environment::with_prefix("CALOCC")
                    .prefix_separator("__")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;
        settings.engine.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Builds settings from an in-memory TOML document layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the document is not valid TOML or does not match `Settings`.
    pub fn from_toml(document: &str) -> Result<Self> {
        let settings = builder_with_defaults()?
            .add_source(config::File::from_str(document, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?;
        settings.engine.validate()?;
        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables, `.env` and `calocc.toml`.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
