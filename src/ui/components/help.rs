//! Keybinding overview.
//!
//! The listing is generated from the active [`Keymap`], so remapped keys show
//! up here without further wiring.

use crate::app::actions::ActionGroup;
use crate::app::{Action, Keymap};
use crate::ui::components::modal_block;
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const FIXED_KEYS: [(&str, &str); 4] = [
    ("↑/↓ j/k", "Move"),
    ("enter", "Select"),
    ("esc", "Close dialog / cancel"),
    ("ctrl+c", "Quit immediately"),
];

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpRow {
    Heading(&'static str),
    Binding { key: String, description: String },
    Blank,
}

#[derive(Debug, Clone)]
pub struct HelpView {
    rows: Vec<HelpRow>,
    scroll: usize,
}

impl HelpView {
    #[must_use]
    pub fn new(keymap: &Keymap) -> Self {
        Self {
            rows: help_rows(keymap),
            scroll: 0,
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[HelpRow] {
        &self.rows
    }

    #[must_use]
    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll = (self.scroll + 1).min(self.rows.len().saturating_sub(1));
            }
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Home => self.scroll = 0,
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
        let lines: Vec<Line<'_>> = self
            .rows
            .iter()
            .skip(self.scroll)
            .map(|row| match row {
                HelpRow::Heading(title) => Line::from(Span::styled(*title, theme.title())),
                HelpRow::Binding { key, description } => Line::from(vec![
                    Span::styled(format!("  {key:<14}"), theme.highlight()),
                    Span::styled(description.clone(), theme.text()),
                ]),
                HelpRow::Blank => Line::from(""),
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines).block(modal_block("Keybindings", theme)),
            area,
        );
    }
}

/// Groups the keymap's actions under their headings, then the fixed keys.
#[must_use]
pub fn help_rows(keymap: &Keymap) -> Vec<HelpRow> {
    let mut rows = Vec::new();

    for group in [
        ActionGroup::Navigation,
        ActionGroup::Credentials,
        ActionGroup::General,
    ] {
        rows.push(HelpRow::Heading(group.title()));
        rows.extend(
            Action::ALL
                .iter()
                .filter(|action| action.group() == group)
                .map(|&action| HelpRow::Binding {
                    key: keymap.label(action),
                    description: action.description().to_string(),
                }),
        );
        rows.push(HelpRow::Blank);
    }

    rows.push(HelpRow::Heading("Other"));
    rows.extend(FIXED_KEYS.iter().map(|(key, description)| HelpRow::Binding {
        key: (*key).to_string(),
        description: (*description).to_string(),
    }));

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn rows_reflect_keymap() {
        let rows = help_rows(&Keymap::defaults());
        assert_eq!(rows[0], HelpRow::Heading("Navigation"));
        assert!(rows.contains(&HelpRow::Binding {
            key: "a".into(),
            description: "Add credential".into(),
        }));
        assert!(rows.contains(&HelpRow::Heading("Actions")));
    }

    #[test]
    fn scroll_is_bounded() {
        let mut view = HelpView::new(&Keymap::defaults());
        view.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
        assert_eq!(view.scroll(), 0);
        for _ in 0..100 {
            view.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        }
        assert_eq!(view.scroll(), view.rows().len() - 1);
    }
}
