pub(crate) const DEFAULT_USER_AGENT: &str = concat!("plowtrack/", env!("CARGO_PKG_VERSION"));

/// Data source queried when neither `--url` nor config name one.
pub(crate) const DEFAULT_URL: &str = "http://localhost:8000";
pub(crate) const DEFAULT_TIMEOUT: &str = "10s";
pub(crate) const DEFAULT_REFRESH_INTERVAL: &str = "6s";
pub(crate) const DEFAULT_RECENT_WINDOW: &str = "24h";
pub(crate) const DEFAULT_TRAIL_LOOKBACK: &str = "10m";
pub(crate) const DEFAULT_TRAIL_LIMIT: &str = "2000";
pub(crate) const DEFAULT_HOURS: &str = "24";
