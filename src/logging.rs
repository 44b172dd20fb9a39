//! Tracing subscriber setup.
//!
//! Console progress lines of the probe go straight to stdout; this module only
//! controls the structured `tracing` events emitted alongside them.

use tracing::Level;

use crate::config::LoggingConfig;

/// Parse a configured level name, falling back to `INFO`.
pub fn parse_level(level: &str) -> Level {
    level.parse::<Level>().unwrap_or(Level::INFO)
}

/// Install the fmt subscriber if logging is enabled.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(config: &LoggingConfig) {
    if !config.enabled {
        return;
    }
    install(parse_level(&config.level));
}

/// Install the fmt subscriber regardless of `logging.enabled`.
pub fn init_tracing_always(config: &LoggingConfig) {
    install(parse_level(&config.level));
}

fn install(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
