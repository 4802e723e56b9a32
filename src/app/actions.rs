//! User-level actions bound to keys.
//!
//! This module defines [`Action`], the vocabulary shared by the configuration
//! file (`[keybindings]` table), the [`Keymap`](crate::app::Keymap) and the
//! event handler. Each action has a stable snake_case name used in the config
//! file and a short description used by the help overlay and status bar.
//!
//! # Example
//!
//! ```rust
//! use pass_tui::app::Action;
//!
//! assert_eq!(Action::from_name("add_credential"), Some(Action::AddCredential));
//! assert_eq!(Action::AddCredential.name(), "add_credential");
//! ```

/// Commands the user can trigger from the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    /// Exits the application (closes the top modal first if one is open).
    Quit,
    /// Opens the add form.
    AddCredential,
    /// Opens the edit form for the selected credential.
    EditCredential,
    /// Asks for confirmation, then deletes the selected credential.
    DeleteCredential,
    /// Reveals or hides the selected credential's password.
    TogglePassword,
    /// Copies the selected credential's password to the clipboard.
    CopyPassword,
    /// Starts fuzzy search in the credential table.
    Search,
    /// Reloads credentials from the vault.
    Refresh,
    /// Shows the help overlay.
    Help,
    /// Moves focus to the next panel.
    NextFocus,
    /// Moves focus to the previous panel.
    PreviousFocus,
}

/// Help-overlay grouping of actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionGroup {
    Navigation,
    Credentials,
    General,
}

impl ActionGroup {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Credentials => "Actions",
            Self::General => "General",
        }
    }
}

impl Action {
    /// Every action, in help-overlay order.
    pub const ALL: [Self; 11] = [
        Self::NextFocus,
        Self::PreviousFocus,
        Self::Search,
        Self::AddCredential,
        Self::EditCredential,
        Self::DeleteCredential,
        Self::TogglePassword,
        Self::CopyPassword,
        Self::Refresh,
        Self::Help,
        Self::Quit,
    ];

    /// Name used in the `[keybindings]` config table.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::AddCredential => "add_credential",
            Self::EditCredential => "edit_credential",
            Self::DeleteCredential => "delete_credential",
            Self::TogglePassword => "toggle_password",
            Self::CopyPassword => "copy_password",
            Self::Search => "search",
            Self::Refresh => "refresh",
            Self::Help => "help",
            Self::NextFocus => "next_focus",
            Self::PreviousFocus => "previous_focus",
        }
    }

    /// Parses a config-table name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }

    /// Key bound to the action when the config file does not override it.
    #[must_use]
    pub const fn default_key(self) -> &'static str {
        match self {
            Self::Quit => "q",
            Self::AddCredential => "a",
            Self::EditCredential => "e",
            Self::DeleteCredential => "d",
            Self::TogglePassword => "p",
            Self::CopyPassword => "c",
            Self::Search => "/",
            Self::Refresh => "r",
            Self::Help => "?",
            Self::NextFocus => "tab",
            Self::PreviousFocus => "shift+tab",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Quit => "Quit",
            Self::AddCredential => "Add credential",
            Self::EditCredential => "Edit credential",
            Self::DeleteCredential => "Delete credential",
            Self::TogglePassword => "Show/hide password",
            Self::CopyPassword => "Copy password",
            Self::Search => "Search",
            Self::Refresh => "Reload vault",
            Self::Help => "Help",
            Self::NextFocus => "Next panel",
            Self::PreviousFocus => "Previous panel",
        }
    }

    #[must_use]
    pub const fn group(self) -> ActionGroup {
        match self {
            Self::NextFocus | Self::PreviousFocus | Self::Search => ActionGroup::Navigation,
            Self::AddCredential
            | Self::EditCredential
            | Self::DeleteCredential
            | Self::TogglePassword
            | Self::CopyPassword => ActionGroup::Credentials,
            Self::Refresh | Self::Help | Self::Quit => ActionGroup::General,
        }
    }

    /// Whether the action operates on the selected credential.
    #[must_use]
    pub const fn needs_selection(self) -> bool {
        matches!(
            self,
            Self::EditCredential
                | Self::DeleteCredential
                | Self::TogglePassword
                | Self::CopyPassword
        )
    }
}
