//! Credential detail view.
//!
//! Shows every field of the selected credential snapshot plus its usage
//! metadata. The password is masked until the user reveals it; revealing and
//! copying both fetch the secret with usage tracking enabled. A revealed
//! password is forgotten as soon as the selection moves to another credential.

use crate::app::{AppState, FocusTarget};
use crate::domain::{CredentialMetadata, Result};
use crate::infrastructure::ClipboardSink;
use crate::ui::components::{empty, panel_block};
use crate::ui::theme::Theme;
use chrono::Utc;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;
use std::sync::Arc;

/// Placeholder shown instead of a hidden password.
pub const MASKED_PASSWORD: &str = "********";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Revealed {
    service: String,
    password: String,
}

pub struct DetailView {
    state: Arc<AppState>,
    clipboard: Box<dyn ClipboardSink>,
    current: Option<CredentialMetadata>,
    revealed: Option<Revealed>,
}

impl DetailView {
    #[must_use]
    pub fn new(state: Arc<AppState>, clipboard: Box<dyn ClipboardSink>) -> Self {
        let mut view = Self {
            state,
            clipboard,
            current: None,
            revealed: None,
        };
        view.refresh();
        view
    }

    /// Re-reads the selected credential, hiding a password that belongs to a
    /// different credential.
    pub fn refresh(&mut self) {
        self.current = self.state.selected_credential();
        let same = matches!(
            (&self.current, &self.revealed),
            (Some(current), Some(revealed)) if current.service == revealed.service
        );
        if !same {
            self.revealed = None;
        }
    }

    #[must_use]
    pub const fn current(&self) -> Option<&CredentialMetadata> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn is_revealed(&self) -> bool {
        self.revealed.is_some()
    }

    /// Reveals or hides the password of the shown credential.
    ///
    /// Returns the new visibility. Revealing fetches the secret with usage
    /// tracking; hiding does not touch the vault.
    ///
    /// # Errors
    ///
    /// Returns the vault error if the credential cannot be fetched.
    pub fn toggle_password(&mut self) -> Result<bool> {
        if self.revealed.take().is_some() {
            return Ok(false);
        }
        let Some(current) = &self.current else {
            return Ok(false);
        };

        let credential = self.state.get_full_credential(&current.service, true)?;
        self.revealed = Some(Revealed {
            service: credential.metadata.service,
            password: credential.password,
        });
        Ok(true)
    }

    /// Copies the shown credential's password to the clipboard.
    ///
    /// Returns the service name that was copied, or `None` when nothing is shown.
    ///
    /// # Errors
    ///
    /// Returns the vault error if the credential cannot be fetched, or a
    /// clipboard error if the clipboard cannot be written.
    pub fn copy_password(&mut self) -> Result<Option<String>> {
        let Some(current) = &self.current else {
            return Ok(None);
        };
        let credential = self.state.get_full_credential(&current.service, true)?;
        self.clipboard.copy_secret(&credential.password)?;
        Ok(Some(credential.metadata.service))
    }

    /// Removes a copied password from the clipboard if it is still there.
    ///
    /// # Errors
    ///
    /// Returns a clipboard error if the clipboard cannot be reached.
    pub fn clear_clipboard(&mut self) -> Result<()> {
        self.clipboard.clear_secret()
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, theme: &Theme, focused: bool) {
        let Some(current) = &self.current else {
            let block = panel_block(FocusTarget::Detail.title().to_string(), theme, focused);
            empty::render_empty_state(frame, area, block, "No credential selected.", theme);
            return;
        };

        let password = self.revealed.as_ref().map(|r| r.password.as_str());
        let title = format!("{}: {}", FocusTarget::Detail.title(), current.service);
        let block = panel_block(title, theme, focused);
        let paragraph = Paragraph::new(detail_lines(current, password, theme))
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(paragraph, area);
    }
}

impl std::fmt::Debug for DetailView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailView")
            .field("current", &self.current.as_ref().map(|c| &c.service))
            .field("revealed", &self.revealed.is_some())
            .finish_non_exhaustive()
    }
}

/// Formats a credential for display, masking the password unless given.
#[must_use]
pub fn detail_lines(
    credential: &CredentialMetadata,
    password: Option<&str>,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let field = |label: &str, value: &str| {
        let value = if value.is_empty() { "-" } else { value };
        Line::from(vec![
            Span::styled(format!("{label:<10}"), theme.dim()),
            Span::styled(value.to_string(), theme.text()),
        ])
    };

    let password_line = Line::from(vec![
        Span::styled(format!("{:<10}", "Password"), theme.dim()),
        match password {
            Some(secret) => Span::styled(secret.to_string(), theme.secret()),
            None => Span::styled(MASKED_PASSWORD, theme.text()),
        },
    ]);

    let now = Utc::now();
    let mut lines = vec![
        field("Service", &credential.service),
        field("Username", &credential.username),
        password_line,
        field("Category", credential.category_label()),
        field("URL", &credential.url),
        field("Notes", &credential.notes),
        Line::from(""),
        Line::from(Span::styled("Metadata", theme.title())),
        field("Created", &credential.created_at.format("%Y-%m-%d %H:%M").to_string()),
        field(
            "Updated",
            &format!(
                "{} ({} changes)",
                crate::domain::time_ago(credential.updated_at, now),
                credential.modified_count
            ),
        ),
        field("Used", &format!("{} times", credential.usage_count)),
        field("Last used", &credential.last_used()),
    ];

    if !credential.locations.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Locations", theme.title())));
        lines.extend(
            credential
                .locations
                .iter()
                .map(|location| Line::from(Span::styled(format!("  {location}"), theme.dim()))),
        );
    }

    lines
}
