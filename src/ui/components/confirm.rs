//! Yes/no confirmation dialog.

use crate::ui::components::modal_block;
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Pending,
    Confirmed,
    Cancelled,
}

/// Asks before deleting `service`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    pub service: String,
}

impl ConfirmDialog {
    #[must_use]
    pub fn delete(service: &str) -> Self {
        Self {
            title: "Delete Credential".to_string(),
            message: format!("Delete '{service}'? This cannot be undone."),
            service: service.to_string(),
        }
    }

    /// `y` or Enter confirms, `n` cancels. Esc is handled by the page manager.
    #[must_use]
    pub const fn handle_key(&self, key: KeyEvent) -> ConfirmOutcome {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => ConfirmOutcome::Confirmed,
            KeyCode::Char('n' | 'N') => ConfirmOutcome::Cancelled,
            _ => ConfirmOutcome::Pending,
        }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(self.message.clone(), theme.text())),
            Line::from(""),
            Line::from(vec![
                Span::styled("y", theme.title()),
                Span::styled(": yes   ", theme.dim()),
                Span::styled("n", theme.title()),
                Span::styled(": no", theme.dim()),
            ]),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(modal_block(&self.title, theme));
        frame.render_widget(paragraph, area);
    }
}
