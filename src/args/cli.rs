use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};

use crate::render::CoverageView;
use crate::timeline::ScrubPosition;

use super::defaults::{
    DEFAULT_HOURS, DEFAULT_RECENT_WINDOW, DEFAULT_REFRESH_INTERVAL, DEFAULT_TIMEOUT,
    DEFAULT_TRAIL_LIMIT, DEFAULT_TRAIL_LOOKBACK, DEFAULT_URL,
};
use super::parsers::{
    parse_bool_env, parse_date_arg, parse_duration_arg, parse_positive_u32, parse_timestamp_arg,
};

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Load a coverage window and write the rendered layers at a scrub position
    Coverage(CoverageArgs),
    /// Draw the recent trail of one vehicle
    Trail(TrailArgs),
    /// Follow live vehicle positions until interrupted
    Watch(WatchArgs),
    /// Print data source statistics
    Stats,
}

#[derive(Debug, Args, Clone)]
pub struct CoverageArgs {
    /// Window of the last N hours (defaults to --default-hours)
    #[arg(long, value_parser = parse_positive_u32, conflicts_with = "date")]
    pub hours: Option<u32>,

    /// Local calendar day to load (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,

    /// Playback position from 0 (window start) to 1000 (window end)
    #[arg(long, default_value = "1000")]
    pub scrub: ScrubPosition,

    /// Draw line segments or a density heatmap
    #[arg(long, default_value = "lines")]
    pub view: CoverageView,

    /// Write the layer snapshot here instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct TrailArgs {
    /// Vehicle to follow
    pub vehicle_id: String,

    /// End of the trail window (RFC 3339); defaults to the vehicle's last report.
    /// Required for vehicles that are not reporting live
    #[arg(long, value_parser = parse_timestamp_arg)]
    pub at: Option<DateTime<Utc>>,

    /// Write the layer snapshot here instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct WatchArgs {
    /// Refresh period for this session (supports ms/s/m/h)
    #[arg(long, value_parser = parse_duration_arg)]
    pub interval: Option<Duration>,

    /// Keep the trail of this vehicle drawn while watching
    #[arg(long)]
    pub follow: Option<String>,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Plow coverage playback and live vehicle tracking against a vehicle position API."
)]
pub struct PlowArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the vehicle data source
    #[arg(
        long,
        short = 'u',
        global = true,
        env = "PLOWTRACK_URL",
        default_value = DEFAULT_URL,
        help_heading = "Common Options"
    )]
    pub url: String,

    /// Path to config file (TOML/JSON). Defaults to ./plowtrack.toml or ./plowtrack.json if present.
    #[arg(long, global = true, help_heading = "Common Options")]
    pub config: Option<String>,

    /// Request timeout (supports ms/s/m/h)
    #[arg(
        long,
        global = true,
        default_value = DEFAULT_TIMEOUT,
        value_parser = parse_duration_arg,
        help_heading = "Common Options"
    )]
    pub timeout: Duration,

    /// Enable verbose logging (sets log level to debug unless overridden by PLOWTRACK_LOG/RUST_LOG)
    #[arg(long, short = 'v', global = true, help_heading = "Common Options")]
    pub verbose: bool,

    /// Disable color output
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        value_parser = parse_bool_env,
        help_heading = "Common Options"
    )]
    pub no_color: bool,

    /// Live vehicle refresh period (supports ms/s/m/h)
    #[arg(
        long = "refresh-interval",
        global = true,
        default_value = DEFAULT_REFRESH_INTERVAL,
        value_parser = parse_duration_arg,
        help_heading = "Playback Options"
    )]
    pub refresh_interval: Duration,

    /// Hide vehicles that have not reported within this window
    #[arg(
        long = "recent-window",
        global = true,
        default_value = DEFAULT_RECENT_WINDOW,
        value_parser = parse_duration_arg,
        help_heading = "Playback Options"
    )]
    pub recent_window: Duration,

    /// How far back a vehicle trail reaches
    #[arg(
        long = "trail-lookback",
        global = true,
        default_value = DEFAULT_TRAIL_LOOKBACK,
        value_parser = parse_duration_arg,
        help_heading = "Playback Options"
    )]
    pub trail_lookback: Duration,

    /// Maximum history points per trail
    #[arg(
        long = "trail-limit",
        global = true,
        default_value = DEFAULT_TRAIL_LIMIT,
        value_parser = parse_positive_u32,
        help_heading = "Playback Options"
    )]
    pub trail_limit: u32,

    /// Coverage window in hours used when no range is given
    #[arg(
        long = "default-hours",
        global = true,
        default_value = DEFAULT_HOURS,
        value_parser = parse_positive_u32,
        help_heading = "Playback Options"
    )]
    pub default_hours: u32,
}
