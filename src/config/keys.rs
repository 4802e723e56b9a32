//! Key-string parsing for the `[keybindings]` table.
//!
//! A key string is either a single character (`"a"`, `"?"`, `"A"`), a named
//! key (`"enter"`, `"tab"`, `"f5"`), or either of those prefixed with
//! modifiers joined by `+` (`"ctrl+a"`, `"alt+x"`, `"shift+tab"`).
//!
//! Single characters are case-sensitive; named keys and modifiers are not.
//!
//! # Example
//!
//! ```rust
//! use crossterm::event::{KeyCode, KeyModifiers};
//! use pass_tui::config::KeyBinding;
//!
//! let binding: KeyBinding = "ctrl+a".parse()?;
//! assert_eq!(binding.code, KeyCode::Char('a'));
//! assert_eq!(binding.modifiers, KeyModifiers::CONTROL);
//! assert_eq!(binding.to_string(), "ctrl+a");
//! # Ok::<(), pass_tui::domain::PassTuiError>(())
//! ```

use crate::domain::{PassTuiError, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;
use std::str::FromStr;

/// A key plus modifiers, normalized for matching against terminal events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    #[must_use]
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        let (code, modifiers) = normalize(code, modifiers);
        Self { code, modifiers }
    }

    /// Builds the binding a terminal key event corresponds to.
    #[must_use]
    pub fn from_event(event: &KeyEvent) -> Self {
        Self::new(event.code, event.modifiers)
    }

    #[must_use]
    pub fn matches(&self, event: &KeyEvent) -> bool {
        *self == Self::from_event(event)
    }
}

/// Drops modifiers the terminal reports inconsistently.
///
/// Shift is already encoded in the character (`'A'`, `'?'`) and in
/// `BackTab`; keypad/state flags never take part in matching.
fn normalize(code: KeyCode, modifiers: KeyModifiers) -> (KeyCode, KeyModifiers) {
    let modifiers = modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT);
    match code {
        KeyCode::Char(c) if modifiers.contains(KeyModifiers::CONTROL) => (
            KeyCode::Char(c.to_ascii_lowercase()),
            modifiers - KeyModifiers::SHIFT,
        ),
        KeyCode::Char(_) | KeyCode::BackTab => (code, modifiers - KeyModifiers::SHIFT),
        KeyCode::Tab if modifiers.contains(KeyModifiers::SHIFT) => {
            (KeyCode::BackTab, modifiers - KeyModifiers::SHIFT)
        }
        _ => (code, modifiers),
    }
}

fn parse_named(name: &str) -> Option<KeyCode> {
    let lower = name.to_ascii_lowercase();
    let code = match lower.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        f if f.starts_with('f') && f.len() > 1 => {
            let n: u8 = f[1..].parse().ok()?;
            if (1..=12).contains(&n) {
                KeyCode::F(n)
            } else {
                return None;
            }
        }
        _ => return None,
    };
    Some(code)
}

impl FromStr for KeyBinding {
    type Err = PassTuiError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PassTuiError::Config("empty key binding".into()));
        }
        // A lone "+" is the plus key, and "ctrl++" binds ctrl and plus.
        let (prefix, key) = match s.strip_suffix("++") {
            Some(prefix) => (Some(prefix), "+"),
            None if s == "+" => (None, "+"),
            None => match s.rsplit_once('+') {
                Some((prefix, key)) => (Some(prefix), key),
                None => (None, s),
            },
        };

        let mut modifiers = KeyModifiers::NONE;
        if let Some(prefix) = prefix {
            for part in prefix.split('+') {
                modifiers |= match part.trim().to_ascii_lowercase().as_str() {
                    "ctrl" | "control" => KeyModifiers::CONTROL,
                    "alt" | "meta" => KeyModifiers::ALT,
                    "shift" => KeyModifiers::SHIFT,
                    other => {
                        return Err(PassTuiError::Config(format!(
                            "unknown modifier '{other}' in key binding '{s}'"
                        )))
                    }
                };
            }
        }

        let mut chars = key.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(c), None) => {
                if modifiers.contains(KeyModifiers::SHIFT) && !modifiers.contains(KeyModifiers::CONTROL) {
                    KeyCode::Char(c.to_ascii_uppercase())
                } else {
                    KeyCode::Char(c)
                }
            }
            _ => parse_named(key).ok_or_else(|| {
                PassTuiError::Config(format!("unknown key '{key}' in key binding '{s}'"))
            })?,
        };

        Ok(Self::new(code, modifiers))
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            f.write_str("shift+")?;
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Enter => f.write_str("enter"),
            KeyCode::Esc => f.write_str("esc"),
            KeyCode::Tab => f.write_str("tab"),
            KeyCode::BackTab => f.write_str("shift+tab"),
            KeyCode::Backspace => f.write_str("backspace"),
            KeyCode::Delete => f.write_str("delete"),
            KeyCode::Insert => f.write_str("insert"),
            KeyCode::Up => f.write_str("up"),
            KeyCode::Down => f.write_str("down"),
            KeyCode::Left => f.write_str("left"),
            KeyCode::Right => f.write_str("right"),
            KeyCode::Home => f.write_str("home"),
            KeyCode::End => f.write_str("end"),
            KeyCode::PageUp => f.write_str("pageup"),
            KeyCode::PageDown => f.write_str("pagedown"),
            KeyCode::F(n) => write!(f, "f{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}
