//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;


pub use cli::{Command, CoverageArgs, PlowArgs, TrailArgs, WatchArgs};

pub(crate) use defaults::DEFAULT_USER_AGENT;
pub(crate) use parsers::parse_duration_arg;
