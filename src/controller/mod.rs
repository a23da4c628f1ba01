//! Mode and view state machine tying fetching to rendering.
mod mode;
mod playback;
mod refresh;
mod settings;


pub use mode::ViewMode;
pub use playback::{LoadOutcome, LoadReport, PlaybackController, TrailOutcome};
pub use refresh::RefreshTask;
pub use settings::{DEFAULT_RECENT_WINDOW, DEFAULT_REFRESH_INTERVAL, PlaybackSettings};
