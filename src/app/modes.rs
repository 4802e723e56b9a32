//! Input mode state for the main screen.
//!
//! The main screen operates in one of two input modes:
//! - **Normal**: keys resolve through the keymap to actions
//! - **Search**: keys edit the table's search query
//!
//! Modals (form, confirmation, help) take input before either mode is
//! consulted; see [`crate::app::handler`].
//!
//! # Example
//!
//! ```rust
//! use pass_tui::app::InputMode;
//!
//! let mode = InputMode::default();
//! assert!(!mode.is_search());
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Default navigation and command mode.
    ///
    /// Keys are resolved through the keymap; unbound arrow keys, `j`/`k` and
    /// Enter go to the focused panel.
    #[default]
    Normal,

    /// Typing into the search box above the credential table.
    ///
    /// Enter keeps the query and returns to normal mode; Esc clears it.
    Search,
}

impl InputMode {
    #[must_use]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Search)
    }
}
