//! Focus navigation between the main panels.
//!
//! [`NavigationState`] keeps an ordered list of focusable panels and a cursor
//! into it. Tab and Shift+Tab cycle the cursor with wrap-around; a listener
//! is told about every focus change so the renderer can restyle borders and the
//! status bar can switch its hints.
//!
//! The order is owned by whoever knows which panels are on screen. In the
//! application that is the event handler, which resets it after every layout
//! mode change.
//!
//! # Example
//!
//! ```rust
//! use pass_tui::app::{FocusTarget, NavigationState};
//!
//! let mut nav = NavigationState::new();
//! nav.set_focus_order(vec![FocusTarget::Sidebar, FocusTarget::Table, FocusTarget::Detail]);
//! nav.cycle_backward();
//! assert_eq!(nav.current_focus(), FocusTarget::Detail);
//! nav.cycle_forward();
//! assert_eq!(nav.current_focus(), FocusTarget::Sidebar);
//! ```

/// A panel that can hold keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// Category list.
    Sidebar,
    /// Credential table.
    Table,
    /// Detail view of the selected credential.
    Detail,
}

impl FocusTarget {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Sidebar => "Categories",
            Self::Table => "Credentials",
            Self::Detail => "Details",
        }
    }
}

type FocusCallback = Box<dyn FnMut(FocusTarget) + Send>;

/// Ordered focus targets with a wrapping cursor.
#[derive(Default)]
pub struct NavigationState {
    order: Vec<FocusTarget>,
    index: usize,
    on_focus_changed: Option<FocusCallback>,
}

impl NavigationState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the focus order and resets the cursor to the first entry.
    ///
    /// The focus-changed listener is not invoked.
    pub fn set_focus_order(&mut self, order: Vec<FocusTarget>) {
        tracing::debug!(order = ?order, "focus order set");
        self.order = order;
        self.index = 0;
    }

    #[must_use]
    pub fn focus_order(&self) -> &[FocusTarget] {
        &self.order
    }

    /// Moves focus to the next target, wrapping to the first. No-op when empty.
    pub fn cycle_forward(&mut self) {
        if self.order.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.order.len();
        self.focus_index(self.index);
    }

    /// Moves focus to the previous target, wrapping to the last. No-op when empty.
    pub fn cycle_backward(&mut self) {
        if self.order.is_empty() {
            return;
        }
        self.index = if self.index == 0 {
            self.order.len() - 1
        } else {
            self.index - 1
        };
        self.focus_index(self.index);
    }

    /// Jumps to `target` if it is part of the current order.
    ///
    /// Targets that are not on screen are ignored.
    pub fn set_focus(&mut self, target: FocusTarget) {
        if let Some(index) = self.order.iter().position(|t| *t == target) {
            self.index = index;
            self.focus_index(index);
        }
    }

    /// Returns the focused target.
    ///
    /// Falls back to [`FocusTarget::Sidebar`] when the cursor is out of range,
    /// which includes an empty order.
    #[must_use]
    pub fn current_focus(&self) -> FocusTarget {
        self.order
            .get(self.index)
            .copied()
            .unwrap_or(FocusTarget::Sidebar)
    }

    /// Registers the focus-changed listener, replacing any previous one.
    pub fn on_focus_changed<F>(&mut self, callback: F)
    where
        F: FnMut(FocusTarget) + Send + 'static,
    {
        self.on_focus_changed = Some(Box::new(callback));
    }

    fn focus_index(&mut self, index: usize) {
        let Some(target) = self.order.get(index).copied() else {
            return;
        };
        tracing::trace!(target = ?target, "focus changed");
        if let Some(callback) = self.on_focus_changed.as_mut() {
            callback(target);
        }
    }
}

impl std::fmt::Debug for NavigationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationState")
            .field("order", &self.order)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn all() -> Vec<FocusTarget> {
        vec![FocusTarget::Sidebar, FocusTarget::Table, FocusTarget::Detail]
    }

    #[test]
    fn forward_wraps_around() {
        let mut nav = NavigationState::new();
        nav.set_focus_order(all());
        assert_eq!(nav.current_focus(), FocusTarget::Sidebar);
        nav.cycle_forward();
        nav.cycle_forward();
        assert_eq!(nav.current_focus(), FocusTarget::Detail);
        nav.cycle_forward();
        assert_eq!(nav.current_focus(), FocusTarget::Sidebar);
    }

    #[test]
    fn backward_wraps_to_last() {
        let mut nav = NavigationState::new();
        nav.set_focus_order(all());
        nav.cycle_backward();
        assert_eq!(nav.current_focus(), FocusTarget::Detail);
    }

    #[test]
    fn empty_order_is_a_no_op() {
        let mut nav = NavigationState::new();
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        nav.on_focus_changed(move |_| *counter.lock().unwrap() += 1);

        nav.cycle_forward();
        nav.cycle_backward();
        assert_eq!(*calls.lock().unwrap(), 0);
        assert_eq!(nav.current_focus(), FocusTarget::Sidebar);
    }

    #[test]
    fn set_focus_uses_position_in_order() {
        let mut nav = NavigationState::new();
        nav.set_focus_order(vec![FocusTarget::Table, FocusTarget::Detail]);
        nav.set_focus(FocusTarget::Detail);
        assert_eq!(nav.current_focus(), FocusTarget::Detail);

        nav.set_focus(FocusTarget::Sidebar);
        assert_eq!(nav.current_focus(), FocusTarget::Detail);
    }

    #[test]
    fn listener_sees_each_change() {
        let mut nav = NavigationState::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        nav.on_focus_changed(move |target| sink.lock().unwrap().push(target));

        nav.set_focus_order(all());
        nav.cycle_forward();
        nav.cycle_backward();
        nav.set_focus(FocusTarget::Detail);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![FocusTarget::Table, FocusTarget::Sidebar, FocusTarget::Detail]
        );
    }

    #[test]
    fn reset_order_moves_cursor_to_start() {
        let mut nav = NavigationState::new();
        nav.set_focus_order(all());
        nav.cycle_forward();
        nav.set_focus_order(vec![FocusTarget::Table]);
        assert_eq!(nav.current_focus(), FocusTarget::Table);
    }
}
