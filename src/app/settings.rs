use std::time::Duration;

use chrono::TimeDelta;

use crate::args::PlowArgs;
use crate::controller::PlaybackSettings;
use crate::error::{AppResult, ValidationError};
use crate::timeline::RangePreset;

fn time_delta(duration: Duration) -> Result<TimeDelta, ValidationError> {
    TimeDelta::from_std(duration).map_err(|_err| ValidationError::DurationOverflow)
}

/// Controller tunables from parsed arguments; refresh stays off until a
/// command asks for it.
pub(crate) fn playback_settings(args: &PlowArgs) -> AppResult<PlaybackSettings> {
    Ok(PlaybackSettings {
        refresh_interval: None,
        recent_window: time_delta(args.recent_window)?,
        trail_lookback: time_delta(args.trail_lookback)?,
        trail_limit: args.trail_limit,
        default_preset: RangePreset::Hours(args.default_hours),
        ..PlaybackSettings::default()
    })
}
