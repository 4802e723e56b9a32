//! Category sidebar.
//!
//! Shows an "All Credentials" root followed by one row per category label.
//! Enter applies the highlighted row as the category filter.

use crate::app::{AppState, FocusTarget};
use crate::ui::components::panel_block;
use crate::ui::theme::Theme;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};
use ratatui::Frame;
use std::collections::HashMap;
use std::sync::Arc;

/// Label of the root row, which clears the category filter.
pub const ALL_CREDENTIALS: &str = "All Credentials";

#[derive(Debug)]
pub struct Sidebar {
    state: Arc<AppState>,
    categories: Vec<String>,
    counts: HashMap<String, usize>,
    cursor: usize,
}

impl Sidebar {
    #[must_use]
    pub fn new(state: Arc<AppState>) -> Self {
        let mut sidebar = Self {
            state,
            categories: Vec::new(),
            counts: HashMap::new(),
            cursor: 0,
        };
        sidebar.refresh();
        sidebar
    }

    /// Re-reads categories and per-category counts from the shared state.
    pub fn refresh(&mut self) {
        self.categories = self.state.categories().to_vec();
        self.counts.clear();
        for credential in self.state.credentials().iter() {
            *self
                .counts
                .entry(credential.category_label().to_string())
                .or_insert(0) += 1;
        }
        self.cursor = self.cursor.min(self.categories.len());
    }

    /// Number of rows including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len() + 1
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Label of the highlighted row.
    #[must_use]
    pub fn highlighted(&self) -> &str {
        match self.cursor {
            0 => ALL_CREDENTIALS,
            n => self.categories.get(n - 1).map_or(ALL_CREDENTIALS, String::as_str),
        }
    }

    pub fn move_down(&mut self) {
        self.cursor = (self.cursor + 1) % self.len();
    }

    pub fn move_up(&mut self) {
        self.cursor = if self.cursor == 0 {
            self.len() - 1
        } else {
            self.cursor - 1
        };
    }

    pub fn move_first(&mut self) {
        self.cursor = 0;
    }

    pub fn move_last(&mut self) {
        self.cursor = self.len() - 1;
    }

    /// Applies the highlighted row as the category filter.
    pub fn select(&self) {
        let category = match self.cursor {
            0 => None,
            n => self.categories.get(n - 1).cloned(),
        };
        self.state.set_selected_category(category);
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, theme: &Theme, focused: bool) {
        let active = self.state.selected_category();
        let total: usize = self.counts.values().sum();

        let row = |label: &str, count: usize, is_active: bool| {
            let marker = if is_active { "● " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, theme.title()),
                Span::styled(label.to_string(), theme.text()),
                Span::styled(format!(" ({count})"), theme.dim()),
            ]))
        };

        let mut items = vec![row(ALL_CREDENTIALS, total, active.is_none())];
        items.extend(self.categories.iter().map(|label| {
            row(
                label,
                self.counts.get(label).copied().unwrap_or(0),
                active.as_deref() == Some(label.as_str()),
            )
        }));

        let list = List::new(items)
            .block(panel_block(FocusTarget::Sidebar.title().to_string(), theme, focused))
            .highlight_style(if focused {
                theme.selection_style()
            } else {
                theme.dim()
            });

        let mut list_state = ListState::default();
        list_state.select(Some(self.cursor));
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
