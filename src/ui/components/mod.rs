//! UI components.
//!
//! Each panel and modal is a small stateful component. Panels receive the
//! shared [`AppState`](crate::app::AppState) at construction and re-read it in
//! `refresh()` whenever the event handler learns that credentials or
//! selections changed; they never own cache data of their own.
//!
//! # Components
//!
//! - [`sidebar`]: Category list with an "All Credentials" root
//! - [`table`]: Credential table with fuzzy search
//! - [`search`]: Search input box above the table
//! - [`detail`]: Detail view with masked password, reveal and copy
//! - [`statusbar`]: Context hints and timed success/error messages
//! - [`form`]: Add/edit credential form
//! - [`confirm`]: Yes/no confirmation dialog
//! - [`help`]: Keybinding overview
//! - [`empty`]: Empty state message for no items
//! - [`size_warning`]: Overlay shown when the terminal is too small

pub mod confirm;
pub mod detail;
pub mod empty;
pub mod form;
pub mod help;
pub mod search;
pub mod sidebar;
pub mod size_warning;
pub mod statusbar;
pub mod table;

pub use confirm::{ConfirmDialog, ConfirmOutcome};
pub use detail::DetailView;
pub use form::{CredentialForm, FormOutcome, FormSubmission};
pub use help::HelpView;
pub use sidebar::Sidebar;
pub use statusbar::{StatusBar, StatusContext, StatusLevel};
pub use table::CredentialTable;

use crate::ui::theme::Theme;
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders};

/// Bordered block used by every panel.
#[must_use]
pub fn panel_block<'a>(title: String, theme: &Theme, focused: bool) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(theme.border(focused))
        .title(Span::styled(format!(" {title} "), theme.title()))
}

/// Bordered block used by modals.
#[must_use]
pub fn modal_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border(true))
        .title(Span::styled(format!(" {title} "), theme.title()))
        .style(theme.modal())
}
