//! Command handlers behind the CLI.
mod coverage;
mod output;
mod settings;
mod stats;
mod trail;
mod watch;

#[cfg(test)]
mod tests;

use crate::args::{Command, PlowArgs};
use crate::error::AppResult;
use crate::fetch::HttpTrackSource;

pub(crate) use settings::playback_settings;

pub(crate) async fn run(args: PlowArgs) -> AppResult<()> {
    let source = HttpTrackSource::new(&args.url, args.timeout)?;
    tracing::debug!(url = %source.base_url(), "Using data source");
    match &args.command {
        Command::Coverage(command) => coverage::run_coverage(source, &args, command).await,
        Command::Trail(command) => trail::run_trail(source, &args, command).await,
        Command::Watch(command) => watch::run_watch(source, &args, command).await,
        Command::Stats => stats::run_stats(&source).await,
    }
}
