//! Empty state component renderer.
//!
//! This module renders the message displayed inside a panel when it has
//! nothing to show, such as an empty vault or a search without matches.

use crate::ui::theme::Theme;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

/// Renders `message` vertically centered inside `block`.
pub fn render_empty_state(frame: &mut Frame<'_>, area: Rect, block: Block<'_>, message: &str, theme: &Theme) {
    let inner_height = area.height.saturating_sub(2);
    let padding = usize::from(inner_height.saturating_sub(1) / 2);

    let mut lines = vec![Line::from(""); padding];
    lines.push(Line::from(Span::styled(message.to_string(), theme.empty_state())));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}
