use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::fetch::{DEFAULT_TRAIL_LIMIT, DEFAULT_TRAIL_LOOKBACK};
use crate::timeline::RangePreset;

/// Period of the live vehicle refresh.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(6);
/// Vehicles silent for longer than this are not shown live.
pub const DEFAULT_RECENT_WINDOW: TimeDelta = TimeDelta::hours(24);

/// Tunables of a `PlaybackController`.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackSettings {
    /// `None` disables the periodic refresh.
    pub refresh_interval: Option<Duration>,
    pub recent_window: TimeDelta,
    pub trail_lookback: TimeDelta,
    pub trail_limit: u32,
    /// Preset loaded on entering coverage.
    pub default_preset: RangePreset,
    pub now: fn() -> DateTime<Utc>,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            refresh_interval: Some(DEFAULT_REFRESH_INTERVAL),
            recent_window: DEFAULT_RECENT_WINDOW,
            trail_lookback: DEFAULT_TRAIL_LOOKBACK,
            trail_limit: DEFAULT_TRAIL_LIMIT,
            default_preset: RangePreset::default(),
            now: Utc::now,
        }
    }
}
