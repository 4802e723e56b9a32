//! Application layer coordinating state, focus, input and actions.
//!
//! This module sits between the terminal loop (main.rs) and the
//! domain/storage/UI layers. It owns the shared credential cache and turns key
//! presses into vault operations.
//!
//! # Architecture
//!
//! ```text
//! Key press → App::handle_key → Action → AppState mutation → VaultService
//!                  ↑                            │
//!                  └──── UiEvent (mpsc) ◄───────┘ callbacks
//! ```
//!
//! # Modules
//!
//! - [`actions`]: User-triggerable actions and their default keys
//! - [`handler`]: Key routing, modal handling and frame drawing
//! - [`keymap`]: Resolved key-to-action mapping
//! - [`modes`]: Input mode of the main screen
//! - [`navigation`]: Cyclic panel focus
//! - [`state`]: Shared credential cache with selections and change callbacks

pub mod actions;
pub mod handler;
pub mod keymap;
pub mod modes;
pub mod navigation;
pub mod state;

pub use actions::Action;
pub use handler::{connect_events, App, Screen, UiEvent};
pub use keymap::Keymap;
pub use modes::InputMode;
pub use navigation::{FocusTarget, NavigationState};
pub use state::AppState;
