//! Status bar component.
//!
//! This module renders the one-row status bar at the bottom of the screen. It
//! shows either a transient message (success or error) or keybinding hints for
//! the current context.
//!
//! # Message Lifetime
//!
//! Success and info messages disappear after [`SUCCESS_TIMEOUT`], errors after
//! [`ERROR_TIMEOUT`]. Expiry is driven by [`StatusBar::tick`], which the event
//! loop calls on every poll timeout.
//!
//! # Example
//!
//! ```rust
//! use pass_tui::ui::components::{StatusBar, StatusLevel};
//! use std::time::{Duration, Instant};
//!
//! let mut bar = StatusBar::new();
//! let now = Instant::now();
//! bar.show_at(StatusLevel::Success, "Copied", now);
//! assert!(bar.message().is_some());
//!
//! bar.tick(now + Duration::from_secs(4));
//! assert!(bar.message().is_none());
//! ```

use crate::app::{Action, Keymap};
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::time::{Duration, Instant};

pub const SUCCESS_TIMEOUT: Duration = Duration::from_secs(3);
pub const ERROR_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Error,
    Info,
}

impl StatusLevel {
    const fn timeout(self) -> Duration {
        match self {
            Self::Error => ERROR_TIMEOUT,
            Self::Success | Self::Info => SUCCESS_TIMEOUT,
        }
    }
}

/// Where input currently goes; selects the hints shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusContext {
    Sidebar,
    Table,
    Detail,
    Search,
    Form,
    Confirm,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
    shown_at: Instant,
}

#[derive(Debug, Default)]
pub struct StatusBar {
    message: Option<StatusMessage>,
}

impl StatusBar {
    #[must_use]
    pub const fn new() -> Self {
        Self { message: None }
    }

    pub fn show(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.show_at(level, text, Instant::now());
    }

    pub fn show_at(&mut self, level: StatusLevel, text: impl Into<String>, now: Instant) {
        self.message = Some(StatusMessage {
            level,
            text: text.into(),
            shown_at: now,
        });
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.show(StatusLevel::Success, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.show(StatusLevel::Error, text);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.show(StatusLevel::Info, text);
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    #[must_use]
    pub const fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    /// Drops the message once its level's timeout has passed.
    pub fn tick(&mut self, now: Instant) {
        let expired = self
            .message
            .as_ref()
            .is_some_and(|m| now.saturating_duration_since(m.shown_at) >= m.level.timeout());
        if expired {
            self.message = None;
        }
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        theme: &Theme,
        context: StatusContext,
        keymap: &Keymap,
    ) {
        let width = usize::from(area.width);
        let line = match &self.message {
            Some(message) => {
                let style = match message.level {
                    StatusLevel::Success => theme.success(),
                    StatusLevel::Error => theme.error(),
                    StatusLevel::Info => theme.text(),
                };
                Line::from(Span::styled(
                    truncate(&format!(" {}", message.text), width),
                    style,
                ))
            }
            None => Line::from(Span::styled(
                truncate(&format!(" {}", hints(context, keymap)), width),
                theme.dim(),
            )),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Keybinding hints for `context`, using the configured keys.
#[must_use]
pub fn hints(context: StatusContext, keymap: &Keymap) -> String {
    let bound = |action: Action| format!("{}: {}", keymap.label(action), action.description());
    let help = bound(Action::Help);
    let quit = bound(Action::Quit);
    let next = bound(Action::NextFocus);

    let parts: Vec<String> = match context {
        StatusContext::Sidebar => vec![
            "↑/↓: move".into(),
            "enter: filter".into(),
            next,
            help,
            quit,
        ],
        StatusContext::Table => vec![
            "↑/↓: move".into(),
            bound(Action::Search),
            bound(Action::AddCredential),
            bound(Action::EditCredential),
            bound(Action::DeleteCredential),
            bound(Action::CopyPassword),
            next,
            help,
        ],
        StatusContext::Detail => vec![
            bound(Action::TogglePassword),
            bound(Action::CopyPassword),
            bound(Action::EditCredential),
            next,
            help,
        ],
        StatusContext::Search => vec![
            "type to filter".into(),
            "enter: keep".into(),
            "esc: clear".into(),
        ],
        StatusContext::Form => vec![
            "tab: next field".into(),
            "enter: save".into(),
            "ctrl+p: show password".into(),
            "esc: cancel".into(),
        ],
        StatusContext::Confirm => vec!["y: confirm".into(), "n/esc: cancel".into()],
        StatusContext::Help => vec!["↑/↓: scroll".into(), "esc: close".into()],
    };

    parts.join(" | ")
}
