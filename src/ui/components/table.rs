//! Credential table with fuzzy search.
//!
//! Rows are the credentials in the selected category, narrowed by the search
//! query. Matching uses the skim algorithm over service, username and URL;
//! every whitespace-separated token must match at least one of them. Matched
//! characters in the service column are highlighted.
//!
//! Moving the cursor or pressing Enter stores a snapshot of the highlighted
//! credential as the application's selected credential.

use crate::app::{AppState, FocusTarget};
use crate::domain::CredentialMetadata;
use crate::ui::components::{empty, panel_block, search};
use crate::ui::helpers::{highlight_ranges, highlighted_spans, truncate};
use crate::ui::theme::Theme;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Row, Table, TableState};
use ratatui::Frame;
use std::sync::Arc;

/// A visible credential with the service-name characters to highlight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub credential: CredentialMetadata,
    pub ranges: Vec<(usize, usize)>,
}

#[derive(Debug)]
pub struct CredentialTable {
    state: Arc<AppState>,
    rows: Vec<TableRow>,
    cursor: usize,
    query: String,
}

impl CredentialTable {
    #[must_use]
    pub fn new(state: Arc<AppState>) -> Self {
        let mut table = Self {
            state,
            rows: Vec::new(),
            cursor: 0,
            query: String::new(),
        };
        table.refresh();
        table
    }

    /// Recomputes the visible rows and clamps the cursor.
    pub fn refresh(&mut self) {
        let _span = tracing::debug_span!("table_refresh", query_len = self.query.len()).entered();

        self.rows = filter_rows(self.state.visible_credentials(), &self.query);
        self.cursor = if self.rows.is_empty() {
            0
        } else {
            self.cursor.min(self.rows.len() - 1)
        };

        tracing::debug!(rows = self.rows.len(), "table refreshed");
    }

    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn highlighted(&self) -> Option<&CredentialMetadata> {
        self.rows.get(self.cursor).map(|row| &row.credential)
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.cursor = 0;
        self.refresh();
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.refresh();
    }

    pub fn clear_query(&mut self) {
        if !self.query.is_empty() {
            self.query.clear();
            self.refresh();
        }
    }

    /// Moves down one row (wrapping) and selects it.
    pub fn move_down(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.rows.len();
        self.select();
    }

    /// Moves up one row (wrapping) and selects it.
    pub fn move_up(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.cursor = if self.cursor == 0 {
            self.rows.len() - 1
        } else {
            self.cursor - 1
        };
        self.select();
    }

    pub fn move_first(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = 0;
            self.select();
        }
    }

    pub fn move_last(&mut self) {
        if !self.rows.is_empty() {
            self.cursor = self.rows.len() - 1;
            self.select();
        }
    }

    /// Stores a snapshot of the highlighted row as the selected credential.
    ///
    /// Does nothing when the table is empty, so an existing selection
    /// survives an empty filter.
    pub fn select(&self) {
        if let Some(credential) = self.highlighted() {
            self.state.set_selected_credential(Some(credential.clone()));
        }
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("{} ({})", FocusTarget::Table.title(), self.rows.len())
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        theme: &Theme,
        focused: bool,
        searching: bool,
    ) {
        let area = if searching || !self.query.is_empty() {
            let [search_area, table_area] =
                Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(area);
            search::render_search_bar(frame, search_area, &self.query, searching, theme);
            table_area
        } else {
            area
        };

        let block = panel_block(self.title(), theme, focused);

        if self.rows.is_empty() {
            let message = if self.query.is_empty() {
                "No credentials yet. Press the add key to create one."
            } else {
                "No credentials match your search."
            };
            empty::render_empty_state(frame, area, block, message, theme);
            return;
        }

        let service_width = usize::from(area.width.saturating_sub(2)) * 2 / 5;
        let rows = self.rows.iter().map(|row| {
            let service = truncate(&row.credential.service, service_width.max(4));
            let ranges: Vec<(usize, usize)> = row.ranges.clone();
            Row::new(vec![
                Cell::from(Line::from(highlighted_spans(
                    &service,
                    &ranges,
                    theme.text(),
                    theme.highlight(),
                ))),
                Cell::from(Span::styled(row.credential.username.clone(), theme.text())),
                Cell::from(Span::styled(row.credential.last_used(), theme.dim())),
            ])
        });

        let header = Row::new(vec!["Service", "Username", "Last Used"]).style(theme.title());
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(40),
                Constraint::Percentage(35),
                Constraint::Percentage(25),
            ],
        )
        .header(header)
        .block(block)
        .highlight_style(if focused {
            theme.selection_style()
        } else {
            theme.dim()
        })
        .highlight_symbol("▶ ");

        let mut table_state = TableState::default();
        table_state.select(Some(self.cursor));
        frame.render_stateful_widget(table, area, &mut table_state);
    }
}

/// Applies the fuzzy query to `credentials`.
///
/// With an empty query every credential is kept in its original order.
/// Otherwise rows are ordered by descending match score, ties keeping their
/// original order.
#[must_use]
pub fn filter_rows(credentials: Vec<CredentialMetadata>, query: &str) -> Vec<TableRow> {
    let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();

    if tokens.is_empty() {
        return credentials
            .into_iter()
            .map(|credential| TableRow {
                credential,
                ranges: Vec::new(),
            })
            .collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, TableRow)> = credentials
        .into_iter()
        .filter_map(|credential| {
            let haystacks = [
                credential.service.to_lowercase(),
                credential.username.to_lowercase(),
                credential.url.to_lowercase(),
            ];

            let mut total = 0;
            for token in &tokens {
                let best = haystacks
                    .iter()
                    .filter_map(|h| matcher.fuzzy_match(h, token))
                    .max()?;
                total += best;
            }

            let ranges = matcher
                .fuzzy_indices(&haystacks[0], &tokens.join(""))
                .map(|(_, indices)| highlight_ranges(&indices))
                .unwrap_or_default();

            Some((total, TableRow { credential, ranges }))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, row)| row).collect()
}
