//! Track retrieval from the data source and cancellation of superseded fetches.
mod http;
mod port;
mod slot;

#[cfg(test)]
mod tests;

pub use http::HttpTrackSource;
pub use port::{DEFAULT_TRAIL_LIMIT, DEFAULT_TRAIL_LOOKBACK, HistoryWindow, TrackSourcePort};
pub use slot::{FetchOutcome, FetchPurpose, FetchSlot};
