//! File-based logging.
//!
//! The terminal belongs to the UI, so all `tracing` output goes to a rotating
//! log file instead of stdout or stderr.
//!
//! # Features
//!
//! - **File Output**: Events written to `<data_dir>/pass-tui/pass-tui.log`
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//! - **Plain Text**: `tracing_subscriber::fmt` output without ANSI colors
//!
//! # Configuration
//!
//! Log level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `log_level` option in the config file
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! ```rust
//! use pass_tui::config::Config;
//! use pass_tui::observability::init_tracing;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("logging initialized");
//! ```
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup and level resolution
//! - [`file_writer`]: Rotating file writer with size-based rotation

pub mod file_writer;
pub mod init;

pub use file_writer::FileWriter;
pub use init::{env_filter, init_tracing};
