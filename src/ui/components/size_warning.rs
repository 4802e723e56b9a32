//! Overlay asking the user to enlarge a too-small terminal.

use crate::config::TerminalConfig;
use crate::ui::components::modal_block;
use crate::ui::theme::Theme;
use ratatui::layout::Alignment;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Wrap};
use ratatui::Frame;

/// Whether a `width` × `height` terminal should show the warning.
#[must_use]
pub fn is_too_small(config: &TerminalConfig, width: u16, height: u16) -> bool {
    config.warning_enabled
        && (u32::from(width) < config.min_width || u32::from(height) < config.min_height)
}

/// Draws the warning over the whole frame when the terminal is too small.
///
/// Returns whether the overlay was drawn.
pub fn render_if_needed(frame: &mut Frame<'_>, config: &TerminalConfig, theme: &Theme) -> bool {
    let area = frame.size();
    if !is_too_small(config, area.width, area.height) {
        return false;
    }

    let lines = vec![
        Line::from(Span::styled("Terminal too small", theme.error())),
        Line::from(""),
        Line::from(Span::styled(
            format!("Current: {}×{}", area.width, area.height),
            theme.text(),
        )),
        Line::from(Span::styled(
            format!("Required: {}×{}", config.min_width, config.min_height),
            theme.text(),
        )),
        Line::from(""),
        Line::from(Span::styled("Please resize the terminal.", theme.dim())),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(modal_block("Resize", theme)),
        area,
    );
    true
}
