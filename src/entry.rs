use std::ffi::OsString;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app;
use crate::args::PlowArgs;
use crate::config::{apply_config, load_config};
use crate::error::AppResult;
use crate::system::logger::init_logging;

/// Parses the command line, applies config and runs the chosen command.
///
/// Everything runs on one thread: the controller's state is `Rc`-shared and
/// its refresh task is spawned onto the local set.
///
/// # Errors
///
/// Returns an error when arguments or config are invalid, or the command fails.
pub fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;

    init_logging(args.verbose, args.no_color);

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, app::run(args))
}

fn parse_args() -> AppResult<(PlowArgs, ArgMatches)> {
    let raw_args: Vec<OsString> = std::env::args_os().collect();
    let matches = PlowArgs::command().get_matches_from(raw_args);
    let args = PlowArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}
