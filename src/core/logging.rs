//! Tracing subscriber setup.

use crate::core::{Error, Result};
use tracing::Level;

/// Install a formatted `tracing` subscriber at the given level.
///
/// Safe to call more than once: later calls report an error instead of
/// replacing the subscriber that is already installed.
pub fn init_tracing(level: Level) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::Internal(format!("tracing subscriber already set: {e}")))
}

/// Map a verbosity count (`-v`, `-vv`, ...) to a level.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}
