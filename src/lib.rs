//! Coverage playback and live tracking for municipal snow-clearing vehicles.
//!
//! The crate loads vehicle tracks for a time window from an HTTP data source,
//! replays them on a map surface at a scrub position (aged line segments or a
//! density heatmap), and follows live vehicles with a periodically refreshed
//! trail. The `plowtrack` binary drives it from the command line and renders
//! into an in-memory surface that can be dumped as GeoJSON-shaped JSON.
pub mod args;
pub mod config;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod render;
pub mod timeline;
pub mod tracks;

mod app;
mod entry;
mod system;

pub use entry::run;
