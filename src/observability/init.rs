//! Tracing initialization and subscriber setup.
//!
//! This module configures the `tracing` subscriber: an [`EnvFilter`] chooses
//! the level and a `fmt` layer writes plain-text events to the rotating log
//! file.

use super::file_writer::FileWriter;
use crate::config::Config;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Initializes the tracing subscriber with file output.
///
/// # Level Resolution
///
/// 1. `RUST_LOG` environment variable
/// 2. `config.log_level` if set and valid
/// 3. Default: `"info"`
///
/// # File Location
///
/// Events are written to `<data_dir>/pass-tui/pass-tui.log`.
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently skips logging if the directory cannot be created
/// - Idempotent: only the first call installs a subscriber
pub fn init_tracing(config: &Config) {
    let log_file = crate::infrastructure::paths::log_file();
    if let Some(parent) = log_file.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let writer = Arc::new(FileWriter::new(log_file));
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(layer)
        .try_init();
}

/// Builds the level filter from the environment or the configuration.
#[must_use]
pub fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        config
            .log_level
            .as_deref()
            .and_then(|level| EnvFilter::try_new(level).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL))
    })
}
