//! Miscellaneous utilities.

use std::str::FromStr;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::util::SubscriberInitExt;

use crate::TcResult;

/// Initializes the logger. Logs go to stderr so they never mix with the
/// build status printed on stdout.
pub fn init_logger(level: &str) -> TcResult<()> {
    let level = Level::from_str(level)?;

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_max_level(level);

    if level <= Level::WARN {
        builder
            .without_time()
            .finish()
            .try_init()
            .context("failed to initialize the logger")?;
    } else {
        builder
            .with_timer(tracing_subscriber::fmt::time::uptime())
            .finish()
            .try_init()
            .context("failed to initialize the logger")?;
    }

    info!("initialized logger with log level: {}", level);

    Ok(())
}

/// Returns true if spinners should be drawn for the given log level.
pub fn show_progress(level: &str) -> bool {
    matches!(Level::from_str(level), Ok(level) if level < Level::DEBUG)
}
