use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Env variable checked before `RUST_LOG`.
pub(crate) const LOG_ENV: &str = "PLOWTRACK_LOG";

fn level_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    }
}

pub(crate) fn init_logging(verbose: bool, no_color: bool) {
    let filter = std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| level_filter(verbose),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| level_filter(verbose)),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}
