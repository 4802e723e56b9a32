//! Responsive panel layout.
//!
//! [`LayoutManager`] maps the terminal width to one of three [`LayoutMode`]s
//! and keeps the panel composition for the current mode. The composition is
//! rebuilt only when the mode changes, so resize events that stay within the
//! same mode cost nothing.
//!
//! # Modes
//!
//! ```text
//! width <  80          Small    [ table                          ]
//! 80 <= width < 120    Medium   [ sidebar | table                ]
//! width >= 120         Large    [ sidebar | table        | detail ]
//! ```
//!
//! The sidebar is 20 columns, the detail view 40 columns, and the table takes
//! the rest. A one-row status bar always sits below the panel row.
//!
//! The manager only arranges the panel handles it was given at construction;
//! it never creates or owns the components behind them.

use crate::domain::{PassTuiError, Result};
use ratatui::layout::{Constraint, Layout, Rect};

/// Default width at which the sidebar appears.
pub const DEFAULT_MEDIUM_BREAKPOINT: u16 = 80;
/// Default width at which the detail view appears.
pub const DEFAULT_LARGE_BREAKPOINT: u16 = 120;

const SIDEBAR_WIDTH: u16 = 20;
const DETAIL_WIDTH: u16 = 40;
const STATUS_BAR_HEIGHT: u16 = 1;

/// Width class of the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    Small,
    Medium,
    Large,
}

impl LayoutMode {
    /// Classifies `width` against the given breakpoints.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pass_tui::ui::layout::LayoutMode;
    ///
    /// assert_eq!(LayoutMode::for_width(79, 80, 120), LayoutMode::Small);
    /// assert_eq!(LayoutMode::for_width(80, 80, 120), LayoutMode::Medium);
    /// assert_eq!(LayoutMode::for_width(120, 80, 120), LayoutMode::Large);
    /// ```
    #[must_use]
    pub const fn for_width(width: u16, medium: u16, large: u16) -> Self {
        if width < medium {
            Self::Small
        } else if width < large {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

/// The externally supplied handles the manager arranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSet<P> {
    pub sidebar: P,
    pub table: P,
    pub detail: P,
}

/// One panel in the composition with its horizontal size constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<P> {
    pub panel: P,
    pub constraint: Constraint,
}

/// Width-driven layout state machine.
#[derive(Debug, Clone)]
pub struct LayoutManager<P> {
    panels: PanelSet<P>,
    width: u16,
    height: u16,
    mode: LayoutMode,
    medium_breakpoint: u16,
    large_breakpoint: u16,
    composition: Vec<Slot<P>>,
    rebuilds: usize,
}

impl<P: Copy> LayoutManager<P> {
    /// Creates a manager in [`LayoutMode::Small`] with its composition built.
    #[must_use]
    pub fn new(panels: PanelSet<P>) -> Self {
        let composition = compose(&panels, LayoutMode::Small);
        Self {
            panels,
            width: 0,
            height: 0,
            mode: LayoutMode::Small,
            medium_breakpoint: DEFAULT_MEDIUM_BREAKPOINT,
            large_breakpoint: DEFAULT_LARGE_BREAKPOINT,
            composition,
            rebuilds: 0,
        }
    }

    /// Changes the breakpoints and re-evaluates the mode for the last known width.
    ///
    /// # Errors
    ///
    /// Returns [`PassTuiError::Config`] unless `medium < large`.
    pub fn set_breakpoints(&mut self, medium: u16, large: u16) -> Result<()> {
        if medium >= large {
            return Err(PassTuiError::Config(format!(
                "medium breakpoint ({medium}) must be less than large breakpoint ({large})"
            )));
        }
        self.medium_breakpoint = medium;
        self.large_breakpoint = large;
        self.apply_mode(self.mode_for_width(self.width));
        Ok(())
    }

    #[must_use]
    pub const fn mode_for_width(&self, width: u16) -> LayoutMode {
        LayoutMode::for_width(width, self.medium_breakpoint, self.large_breakpoint)
    }

    /// Records the frame size seen during a draw.
    ///
    /// Calls [`Self::handle_resize`] only when the size differs from the last
    /// one observed. Returns `true` if the composition was rebuilt.
    pub fn observe(&mut self, width: u16, height: u16) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        self.handle_resize(width, height)
    }

    /// Updates the size, rebuilding the composition if the mode changed.
    ///
    /// Returns `true` if the composition was rebuilt.
    pub fn handle_resize(&mut self, width: u16, height: u16) -> bool {
        self.width = width;
        self.height = height;
        self.apply_mode(self.mode_for_width(width))
    }

    fn apply_mode(&mut self, mode: LayoutMode) -> bool {
        if mode == self.mode {
            return false;
        }
        tracing::debug!(from = ?self.mode, to = ?mode, width = self.width, "layout mode changed");
        self.mode = mode;
        self.composition = compose(&self.panels, mode);
        self.rebuilds += 1;
        true
    }

    #[must_use]
    pub const fn mode(&self) -> LayoutMode {
        self.mode
    }

    #[must_use]
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Number of times the composition was rebuilt after construction.
    #[must_use]
    pub const fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    #[must_use]
    pub fn composition(&self) -> &[Slot<P>] {
        &self.composition
    }

    /// Panels in the current composition, left to right.
    #[must_use]
    pub fn visible_panels(&self) -> Vec<P> {
        self.composition.iter().map(|slot| slot.panel).collect()
    }

    /// Splits `area` into the content row and the status bar row.
    #[must_use]
    pub fn main_areas(area: Rect) -> (Rect, Rect) {
        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(STATUS_BAR_HEIGHT)])
            .split(area);
        (rows[0], rows[1])
    }

    /// Assigns a rectangle of `area` to each panel in the composition.
    #[must_use]
    pub fn split(&self, area: Rect) -> Vec<(P, Rect)> {
        let areas = Layout::horizontal(self.composition.iter().map(|slot| slot.constraint))
            .split(area);
        self.composition
            .iter()
            .zip(areas.iter())
            .map(|(slot, rect)| (slot.panel, *rect))
            .collect()
    }
}

fn compose<P: Copy>(panels: &PanelSet<P>, mode: LayoutMode) -> Vec<Slot<P>> {
    let sidebar = Slot {
        panel: panels.sidebar,
        constraint: Constraint::Length(SIDEBAR_WIDTH),
    };
    let table = Slot {
        panel: panels.table,
        constraint: Constraint::Min(1),
    };
    let detail = Slot {
        panel: panels.detail,
        constraint: Constraint::Length(DETAIL_WIDTH),
    };

    match mode {
        LayoutMode::Small => vec![table],
        LayoutMode::Medium => vec![sidebar, table],
        LayoutMode::Large => vec![sidebar, table, detail],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Pane {
        Side,
        Main,
        Info,
    }

    fn manager() -> LayoutManager<Pane> {
        LayoutManager::new(PanelSet {
            sidebar: Pane::Side,
            table: Pane::Main,
            detail: Pane::Info,
        })
    }

    #[test]
    fn default_boundaries() {
        let layout = manager();
        assert_eq!(layout.mode_for_width(79), LayoutMode::Small);
        assert_eq!(layout.mode_for_width(80), LayoutMode::Medium);
        assert_eq!(layout.mode_for_width(119), LayoutMode::Medium);
        assert_eq!(layout.mode_for_width(120), LayoutMode::Large);
    }

    #[test]
    fn initial_composition_shows_table() {
        let layout = manager();
        assert_eq!(layout.visible_panels(), vec![Pane::Main]);
        assert_eq!(layout.rebuild_count(), 0);
    }

    #[test]
    fn rebuild_only_on_mode_change() {
        let mut layout = manager();
        assert!(layout.handle_resize(100, 40));
        assert!(!layout.handle_resize(110, 40));
        assert!(!layout.handle_resize(81, 30));
        assert_eq!(layout.rebuild_count(), 1);
        assert!(layout.handle_resize(150, 30));
        assert_eq!(layout.visible_panels(), vec![Pane::Side, Pane::Main, Pane::Info]);
        assert_eq!(layout.rebuild_count(), 2);
    }

    #[test]
    fn observe_ignores_unchanged_size() {
        let mut layout = manager();
        assert!(layout.observe(130, 40));
        assert!(!layout.observe(130, 40));
        assert_eq!(layout.size(), (130, 40));
    }

    #[test]
    fn custom_breakpoints_shift_boundaries() {
        let mut layout = manager();
        layout.set_breakpoints(60, 100).unwrap();
        assert_eq!(layout.mode_for_width(59), LayoutMode::Small);
        assert_eq!(layout.mode_for_width(60), LayoutMode::Medium);
        assert_eq!(layout.mode_for_width(100), LayoutMode::Large);
        assert!(layout.set_breakpoints(100, 100).is_err());
    }

    #[test]
    fn breakpoint_change_reevaluates_mode() {
        let mut layout = manager();
        layout.handle_resize(90, 30);
        assert_eq!(layout.mode(), LayoutMode::Medium);
        layout.set_breakpoints(60, 90).unwrap();
        assert_eq!(layout.mode(), LayoutMode::Large);
    }

    #[test]
    fn split_assigns_fixed_widths() {
        let mut layout = manager();
        layout.handle_resize(140, 30);
        let areas = layout.split(Rect::new(0, 0, 140, 29));
        assert_eq!(areas.len(), 3);
        assert_eq!(areas[0].0, Pane::Side);
        assert_eq!(areas[0].1.width, 20);
        assert_eq!(areas[1].1.width, 80);
        assert_eq!(areas[2].1.width, 40);
    }

    #[test]
    fn status_bar_is_one_row() {
        let (content, status) = LayoutManager::<Pane>::main_areas(Rect::new(0, 0, 80, 24));
        assert_eq!(status.height, 1);
        assert_eq!(content.height, 23);
        assert_eq!(status.y, 23);
    }
}
