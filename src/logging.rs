// src/logging.rs

//! Logging setup for `relaybell` using `tracing` + `tracing-subscriber`.
//!
//! The log level is taken from the `--log-level` CLI flag when given,
//! otherwise from the `RELAYBELL_LOG` environment variable, otherwise it
//! defaults to `info`.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Initialise the global logging subscriber.
///
/// Must only be called once; `init()` panics on a second call, and main
/// calls it exactly once before anything else logs.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let level = cli_level.map_or_else(level_from_env, Level::from);

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    Ok(())
}

fn level_from_env() -> Level {
    std::env::var("RELAYBELL_LOG")
        .ok()
        .and_then(|s| s.trim().parse::<Level>().ok())
        .unwrap_or(Level::INFO)
}

impl From<LogLevel> for Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}
