//! Domain layer for pass-tui.
//!
//! This module contains the core credential types and error definitions,
//! independent of the terminal UI or the storage format. Both the vault backend
//! and the application state speak in these types.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`credential`]: Credential model, update options and category helpers
//!
//! # Examples
//!
//! ```
//! use pass_tui::domain::{FieldUpdate, UpdateOptions};
//!
//! let opts = UpdateOptions {
//!     notes: FieldUpdate::Set(String::new()),
//!     ..UpdateOptions::default()
//! };
//! assert!(!opts.is_empty());
//! ```

pub mod credential;
pub mod error;

pub use credential::{
    category_from_label, category_label, filter_by_category, time_ago, Credential,
    CredentialMetadata, FieldUpdate, NewCredential, UpdateOptions, UNCATEGORIZED,
};
pub use error::{PassTuiError, Result};
