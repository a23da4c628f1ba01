use std::time::Duration;

use serde::Deserialize;

use crate::args::parse_duration_arg;
use crate::error::ConfigError;

/// Contents of `plowtrack.toml` / `plowtrack.json`.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub timeout: Option<DurationValue>,
    pub refresh_interval: Option<DurationValue>,
    pub recent_window: Option<DurationValue>,
    pub trail_lookback: Option<DurationValue>,
    pub trail_limit: Option<u32>,
    pub default_hours: Option<u32>,
}

/// Whole seconds, or a string with an `ms`/`s`/`m`/`h` suffix.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self, field: &'static str) -> Result<Duration, ConfigError> {
        let parsed = match self {
            DurationValue::Seconds(secs) => parse_duration_arg(&secs.to_string()),
            DurationValue::Text(text) => parse_duration_arg(text),
        };
        parsed.map_err(|err| ConfigError::InvalidDuration { field, source: err })
    }
}
