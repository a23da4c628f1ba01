use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::PlowArgs;
use crate::error::{AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// Values passed on the command line or via environment win over the file.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(args: &mut PlowArgs, matches: &ArgMatches, config: &ConfigFile) -> AppResult<()> {
    if !is_explicit(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = url;
    }

    if !is_explicit(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = timeout.to_duration("timeout")?;
    }

    if !is_explicit(matches, "refresh_interval")
        && let Some(interval) = config.refresh_interval.as_ref()
    {
        args.refresh_interval = interval.to_duration("refresh_interval")?;
    }

    if !is_explicit(matches, "recent_window")
        && let Some(window) = config.recent_window.as_ref()
    {
        args.recent_window = window.to_duration("recent_window")?;
    }

    if !is_explicit(matches, "trail_lookback")
        && let Some(lookback) = config.trail_lookback.as_ref()
    {
        args.trail_lookback = lookback.to_duration("trail_lookback")?;
    }

    if !is_explicit(matches, "trail_limit")
        && let Some(limit) = config.trail_limit
    {
        args.trail_limit = ensure_positive(limit, "trail_limit")?;
    }

    if !is_explicit(matches, "default_hours")
        && let Some(hours) = config.default_hours
    {
        args.default_hours = ensure_positive(hours, "default_hours")?;
    }

    Ok(())
}

/// Given on the command line or through its environment variable.
fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

const fn ensure_positive(value: u32, field: &'static str) -> Result<u32, ConfigError> {
    if value == 0 {
        Err(ConfigError::FieldMustBePositive { field })
    } else {
        Ok(value)
    }
}
