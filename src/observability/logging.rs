//! Tracing subscriber setup for the `blinkreact` binary.
//!
//! `BLINKREACT_LOG` (then `RUST_LOG`) takes precedence over the level
//! derived from `-v` flags. Logs go to stderr so report output on stdout
//! stays clean.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Map a `-v` count to a default level.
#[must_use]
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialise the global subscriber. Only the first call takes effect.
pub fn init_logging(verbosity: u8) {
    let level = level_for_verbosity(verbosity);
    let env_filter = EnvFilter::try_from_env("BLINKREACT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .ok();
}
