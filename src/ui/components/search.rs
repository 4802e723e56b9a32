//! Search bar component renderer.
//!
//! This module renders the search input box shown above the credential table
//! while a query is being typed or applied.

use crate::ui::theme::Theme;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

/// Renders the search input box.
///
/// Displays a 3-line bordered box containing the query. While `active`, the
/// box uses the search border color and shows a cursor block after the text;
/// otherwise the applied query is shown dimmed.
///
/// # Parameters
///
/// * `frame` - Frame to draw into
/// * `area` - Target rectangle (3 rows tall)
/// * `query` - Current search query
/// * `active` - Whether the user is typing in the box
/// * `theme` - Active color theme
pub fn render_search_bar(frame: &mut Frame<'_>, area: Rect, query: &str, active: bool, theme: &Theme) {
    let border_style = if active {
        theme.search_border()
    } else {
        theme.border(false)
    };

    let mut spans = vec![
        Span::styled("/ ", theme.dim()),
        Span::styled(query.to_string(), if active { theme.text() } else { theme.dim() }),
    ];
    if active {
        spans.push(Span::styled("█", theme.search_border()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(" Search ", theme.title())),
    );
    frame.render_widget(paragraph, area);
}
