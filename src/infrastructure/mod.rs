//! Infrastructure layer for filesystem and platform interactions.
//!
//! This module wraps the pieces of the host environment the application
//! touches directly: platform directories, the working directory used as an
//! access location, and the system clipboard.

pub mod clipboard;
pub mod paths;

pub use clipboard::{ClipboardSink, SystemClipboard, CLIPBOARD_LIFETIME_SECS};
pub use paths::{config_file, get_config_dir, get_data_dir, log_file, vault_file};
