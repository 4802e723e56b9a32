//! pass-tui: a terminal user interface for a local credential vault.
//!
//! pass-tui provides:
//! - A category sidebar, a fuzzy-searchable credential table and a detail view
//! - Add, edit and delete through modal forms and confirmation dialogs
//! - Password reveal and clipboard copy with usage tracking
//! - A responsive three-mode layout driven by terminal width
//! - TOML configuration for theme, layout breakpoints and keybindings

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Loop (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Shared state
//! │  - AppState cache + callbacks                       │  ← Key routing
//! │  - Focus navigation, keymap, actions                │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Config        │
//! │ (ui/)         │   │ (storage/)    │   │ (config/)     │
//! │ - Layout      │   │ - Vault trait │   │ - TOML load   │
//! │ - Modal stack │   │ - JSON vault  │   │ - Validation  │
//! │ - Components  │   │ - Usage stats │   │ - Key parsing │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths, clipboard (infrastructure/)      │
//! │  - Error types (domain/error)                       │
//! │  - Credential model (domain/credential)             │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber                               │
//! │  - Rotating log file                                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Shared state, navigation, keymap and the event handler
//! - [`config`]: Configuration file loading and validation
//! - [`domain`]: Core domain types (credentials, errors)
//! - [`infrastructure`]: Platform paths and clipboard
//! - [`storage`]: Vault backend trait and JSON file vault
//! - [`ui`]: ratatui rendering, layout and modal stack
//! - [`observability`]: File-based tracing
//!
//! # Configuration
//!
//! The application reads `<config_dir>/pass-tui/config.toml`:
//!
//! ```toml
//! theme = "dracula"
//! log_level = "info"
//!
//! [terminal]
//! warning_enabled = true
//! min_width = 60
//! min_height = 30
//!
//! [layout]
//! medium_breakpoint = 80
//! large_breakpoint = 120
//!
//! [keybindings]
//! quit = "q"
//! copy_password = "ctrl+y"
//! ```
//!
//! Missing keys take their defaults. An invalid file is ignored and the
//! problem is shown in the status bar.
//!
//! # Initialization Flow
//!
//! 1. **Startup** (`main.rs`):
//!    - Load and validate configuration
//!    - Initialize tracing to the log file
//!    - Open the vault at `<data_dir>/pass-tui/vault.json` (or `$PASS_TUI_VAULT`)
//!    - Create `AppState` and connect its callbacks to the UI event channel
//!    - Load credentials
//!
//! 2. **Event Loop**:
//!    - Drain UI events and refresh components
//!    - Draw the frame, adapting the layout to its width
//!    - Poll for key and resize events
//!
//! # Example
//!
//! ```rust
//! use pass_tui::app::AppState;
//! use pass_tui::domain::NewCredential;
//! use pass_tui::storage::JsonVault;
//! use std::sync::Arc;
//!
//! let dir = tempfile::tempdir()?;
//! let vault = JsonVault::open(dir.path().join("vault.json"))?;
//! let state = AppState::new(Arc::new(vault));
//!
//! state.add(&NewCredential {
//!     service: "github".into(),
//!     username: "octocat".into(),
//!     password: "hunter2".into(),
//!     category: "dev".into(),
//!     ..NewCredential::default()
//! })?;
//!
//! assert_eq!(state.categories().as_slice(), ["dev"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Explicit State Owner
//!
//! Components receive `Arc<AppState>` at construction instead of looking
//! state up in a registry. `AppState` guards its fields with one `RwLock` and
//! never holds it across vault I/O or callbacks.
//!
//! ## Snapshot Reads
//!
//! Credential lists are handed out as `Arc<Vec<_>>` snapshots that stay
//! valid after the cache is replaced.
//!
//! ## Rebuild on Mode Change
//!
//! The layout composition is rebuilt only when the width crosses a
//! breakpoint, not on every resize.

pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{App, AppState, FocusTarget, NavigationState};
pub use config::Config;
pub use domain::{PassTuiError, Result};
pub use ui::{LayoutManager, PageManager, Theme};
