//! Top-level rendering coordinator.
//!
//! This module draws one frame from the [`App`]: the panels of the current
//! layout composition, the status bar, every open modal from bottom to top,
//! and finally the size warning when the terminal is too small.
//!
//! # Architecture
//!
//! The renderer follows a three-step process:
//!
//! 1. **Panels**: split the content area with the layout manager and delegate
//!    each slot to its component
//! 2. **Modals**: clear a centered rectangle per modal and draw it
//! 3. **Overlay**: the size warning covers everything else
//!
//! The renderer never mutates application state; layout mode changes are
//! applied by [`App::draw`] before this runs.

use crate::app::{App, FocusTarget, Screen};
use crate::ui::components::size_warning;
use crate::ui::layout::LayoutManager;
use crate::ui::pages::modal_area;
use ratatui::widgets::Clear;
use ratatui::Frame;

/// Renders the whole UI for `app`.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    let theme = app.theme();
    let (content, status_area) = LayoutManager::<FocusTarget>::main_areas(frame.size());
    let focus = app.navigation().current_focus();
    let modal_open = app.pages().has_modals();

    for (panel, area) in app.layout().split(content) {
        let focused = panel == focus && !modal_open;
        match panel {
            FocusTarget::Sidebar => app.sidebar().render(frame, area, theme, focused),
            FocusTarget::Table => {
                app.table()
                    .render(frame, area, theme, focused, app.mode().is_search());
            }
            FocusTarget::Detail => app.detail().render(frame, area, theme, focused),
        }
    }

    app.status()
        .render(frame, status_area, theme, app.status_context(), app.keymap());

    for (_, screen, (width, height)) in app.pages().modals() {
        let area = modal_area(frame.size(), width, height);
        frame.render_widget(Clear, area);
        match screen {
            Screen::Form(form) => form.render(frame, area, theme),
            Screen::Confirm(dialog) => dialog.render(frame, area, theme),
            Screen::Help(help) => help.render(frame, area, theme),
            Screen::Main => {}
        }
    }

    size_warning::render_if_needed(frame, &app.config().terminal, theme);
}
