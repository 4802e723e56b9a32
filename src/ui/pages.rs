//! Named pages and the modal stack.
//!
//! [`PageManager`] holds one base page (the main screen) plus a LIFO stack of
//! modals drawn on top of it. It is generic over the page content so the
//! application can store whatever screen state it needs.
//!
//! # Escape Handling
//!
//! [`PageManager::handle_key`] consumes `Esc` while a modal is open and closes
//! only the top modal. Every other key, and `Esc` with no modal open, is handed
//! back to the caller.
//!
//! # Example
//!
//! ```rust
//! use pass_tui::ui::pages::PageManager;
//!
//! let mut pages = PageManager::new();
//! pages.show_page("main", "table");
//! pages.show_modal("help", "keys", 60, 24);
//! assert_eq!(pages.current_name(), Some("help"));
//!
//! pages.close_top_modal();
//! assert_eq!(pages.current_name(), Some("main"));
//! ```

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use std::collections::HashMap;

/// Standard size for add/edit forms.
pub const FORM_MODAL_SIZE: (u16, u16) = (60, 20);
/// Standard size for confirmation dialogs.
pub const CONFIRM_MODAL_SIZE: (u16, u16) = (60, 9);
/// Standard size for the help overlay.
pub const HELP_MODAL_SIZE: (u16, u16) = (60, 24);

#[derive(Debug, Clone)]
struct Modal<T> {
    name: String,
    content: T,
    width: u16,
    height: u16,
}

/// Registry of named pages with a modal stack.
#[derive(Debug, Clone)]
pub struct PageManager<T> {
    pages: HashMap<String, T>,
    base: Option<String>,
    modals: Vec<Modal<T>>,
}

impl<T> Default for PageManager<T> {
    fn default() -> Self {
        Self {
            pages: HashMap::new(),
            base: None,
            modals: Vec::new(),
        }
    }
}

impl<T> PageManager<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `content` as the page `name` and makes it the base page.
    ///
    /// Open modals stay open on top of the new base page.
    pub fn show_page(&mut self, name: &str, content: T) {
        tracing::debug!(page = name, "showing page");
        self.pages.insert(name.to_string(), content);
        self.base = Some(name.to_string());
    }

    /// Pushes a modal on top of the stack and makes it current.
    ///
    /// A `width` or `height` of zero means half of the screen in that
    /// dimension. Showing a name that is already open moves it to the top.
    pub fn show_modal(&mut self, name: &str, content: T, width: u16, height: u16) {
        tracing::debug!(modal = name, width = width, height = height, "showing modal");
        self.modals.retain(|m| m.name != name);
        self.modals.push(Modal {
            name: name.to_string(),
            content,
            width,
            height,
        });
    }

    /// Removes the modal `name` wherever it sits in the stack.
    ///
    /// When the stack becomes empty the base page is current again. Returns the
    /// removed content, or `None` if no such modal was open.
    pub fn close_modal(&mut self, name: &str) -> Option<T> {
        let index = self.modals.iter().position(|m| m.name == name)?;
        let modal = self.modals.remove(index);
        tracing::debug!(modal = name, remaining = self.modals.len(), "modal closed");
        Some(modal.content)
    }

    /// Closes the most recently opened modal.
    pub fn close_top_modal(&mut self) -> Option<T> {
        let modal = self.modals.pop()?;
        tracing::debug!(modal = %modal.name, remaining = self.modals.len(), "top modal closed");
        Some(modal.content)
    }

    #[must_use]
    pub fn has_modals(&self) -> bool {
        !self.modals.is_empty()
    }

    #[must_use]
    pub fn is_modal_open(&self, name: &str) -> bool {
        self.modals.iter().any(|m| m.name == name)
    }

    /// Name of the page or modal currently in front.
    #[must_use]
    pub fn current_name(&self) -> Option<&str> {
        self.modals
            .last()
            .map(|m| m.name.as_str())
            .or(self.base.as_deref())
    }

    /// The base page, regardless of open modals.
    #[must_use]
    pub fn base_page(&self) -> Option<(&str, &T)> {
        let name = self.base.as_deref()?;
        self.pages.get(name).map(|content| (name, content))
    }

    #[must_use]
    pub fn top_modal(&self) -> Option<&T> {
        self.modals.last().map(|m| &m.content)
    }

    pub fn top_modal_mut(&mut self) -> Option<&mut T> {
        self.modals.last_mut().map(|m| &mut m.content)
    }

    /// Open modals from bottom to top with their requested sizes.
    pub fn modals(&self) -> impl Iterator<Item = (&str, &T, (u16, u16))> {
        self.modals
            .iter()
            .map(|m| (m.name.as_str(), &m.content, (m.width, m.height)))
    }

    /// Routes `Esc` to the modal stack.
    ///
    /// Returns `None` when the key was consumed (a modal was closed) and
    /// `Some(key)` when the caller should handle it.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<KeyEvent> {
        if key.code == KeyCode::Esc && self.close_top_modal().is_some() {
            return None;
        }
        Some(key)
    }
}

/// Centers a `width` × `height` rectangle inside `area`.
///
/// Zero in either dimension means half of `area` in that dimension. The
/// result never exceeds `area`.
#[must_use]
pub fn modal_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = if width == 0 { area.width / 2 } else { width }.min(area.width);
    let height = if height == 0 { area.height / 2 } else { height }.min(area.height);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn with_main() -> PageManager<&'static str> {
        let mut pages = PageManager::new();
        pages.show_page("main", "main-screen");
        pages
    }

    #[test]
    fn close_top_is_lifo() {
        let mut pages = with_main();
        pages.show_modal("A", "a", 0, 0);
        pages.show_modal("B", "b", 0, 0);

        assert_eq!(pages.close_top_modal(), Some("b"));
        assert!(pages.has_modals());
        assert_eq!(pages.current_name(), Some("A"));

        assert_eq!(pages.close_modal("A"), Some("a"));
        assert!(!pages.has_modals());
        assert_eq!(pages.current_name(), Some("main"));
    }

    #[test]
    fn close_by_name_from_middle() {
        let mut pages = with_main();
        pages.show_modal("A", "a", 0, 0);
        pages.show_modal("B", "b", 0, 0);
        pages.show_modal("C", "c", 0, 0);

        pages.close_modal("B");
        let names: Vec<&str> = pages.modals().map(|(name, _, _)| name).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(pages.close_modal("missing"), None);
    }

    #[test]
    fn reshowing_moves_to_top() {
        let mut pages = with_main();
        pages.show_modal("A", "a1", 0, 0);
        pages.show_modal("B", "b", 0, 0);
        pages.show_modal("A", "a2", 0, 0);

        assert_eq!(pages.modals().count(), 2);
        assert_eq!(pages.top_modal(), Some(&"a2"));
    }

    #[test]
    fn escape_closes_only_top_modal() {
        let mut pages = with_main();
        pages.show_modal("A", "a", 0, 0);
        pages.show_modal("B", "b", 0, 0);

        assert_eq!(pages.handle_key(key(KeyCode::Esc)), None);
        assert_eq!(pages.current_name(), Some("A"));
        assert_eq!(pages.handle_key(key(KeyCode::Char('x'))), Some(key(KeyCode::Char('x'))));
        assert_eq!(pages.current_name(), Some("A"));
    }

    #[test]
    fn escape_passes_through_without_modals() {
        let mut pages = with_main();
        assert_eq!(pages.handle_key(key(KeyCode::Esc)), Some(key(KeyCode::Esc)));
        assert_eq!(pages.base_page(), Some(("main", &"main-screen")));
    }

    #[test]
    fn modal_area_centers_and_clamps() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(modal_area(area, 60, 20), Rect::new(20, 10, 60, 20));
        assert_eq!(modal_area(area, 0, 0), Rect::new(25, 10, 50, 20));
        assert_eq!(modal_area(Rect::new(0, 0, 40, 10), 60, 20), Rect::new(0, 0, 40, 10));
    }
}
