//! Theme management and ratatui style generation.
//!
//! This module defines the color scheme system for the UI, supporting both
//! built-in themes and custom themes loaded from TOML files. Colors are stored
//! as hex strings and converted to 24-bit [`Color::Rgb`] values on demand.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//! - `dracula`: High-contrast dark theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! border_focused = "#89b4fa"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! success_fg = "#a6e3a1"
//! error_fg = "#f38ba8"
//! secret_fg = "#fab387"
//! ```
//!
//! # Example
//!
//! ```rust
//! use pass_tui::ui::Theme;
//!
//! let theme = Theme::from_name("dracula").unwrap();
//! let style = theme.selection_style();
//! assert!(style.bg.is_some());
//! ```

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

const BUILTIN_MOCHA: &str = include_str!("../../themes/catppuccin-mocha.toml");
const BUILTIN_LATTE: &str = include_str!("../../themes/catppuccin-latte.toml");
const BUILTIN_DRACULA: &str = include_str!("../../themes/dracula.toml");

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are hex strings (e.g. "#cdd6f4"). Optional fields default to
/// `None`, letting themes fall back to the terminal background.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Panel title color.
    pub header_fg: String,
    /// Optional background for modals.
    #[serde(default)]
    pub modal_bg: Option<String>,

    /// Selected row foreground color.
    pub selection_fg: String,
    /// Selected row background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (hints, secondary info).
    pub text_dim: String,

    /// Border color of unfocused panels.
    pub border: String,
    /// Border color of the focused panel.
    pub border_focused: String,

    /// Search bar border color.
    pub search_bar_border: String,
    /// Fuzzy match highlight foreground.
    pub match_highlight_fg: String,
    /// Fuzzy match highlight background.
    pub match_highlight_bg: String,

    /// Empty state message color.
    pub empty_state_fg: String,

    /// Status bar success messages.
    pub success_fg: String,
    /// Status bar and form error messages.
    pub error_fg: String,
    /// Revealed password text.
    pub secret_fg: String,
}

impl Theme {
    /// Names of the built-in themes.
    pub const BUILTIN: [&'static str; 3] = ["catppuccin-mocha", "catppuccin-latte", "dracula"];

    /// Loads a built-in theme by name.
    ///
    /// # Returns
    ///
    /// - `Some(Theme)` if the theme name is recognized
    /// - `None` if the theme name is unknown
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => BUILTIN_MOCHA,
            "catppuccin-latte" => BUILTIN_LATTE,
            "dracula" => BUILTIN_DRACULA,
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (file not found, permission denied, etc.)
    /// - The TOML content cannot be parsed (invalid syntax, missing fields, type mismatches)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read theme file: {e}"))?;

        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse theme TOML: {e}"))
    }

    /// Converts a hex color to RGB tuple.
    ///
    /// Strips `#` prefix if present, validates length, and parses hex digits.
    /// Returns `(255, 255, 255)` (white) on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// Converts a hex color string to a ratatui color.
    #[must_use]
    pub fn color(hex: &str) -> Color {
        let (r, g, b) = Self::hex_to_rgb(hex);
        Color::Rgb(r, g, b)
    }

    #[must_use]
    pub fn text(&self) -> Style {
        Style::default().fg(Self::color(&self.colors.text_normal))
    }

    #[must_use]
    pub fn dim(&self) -> Style {
        Style::default().fg(Self::color(&self.colors.text_dim))
    }

    #[must_use]
    pub fn title(&self) -> Style {
        Style::default()
            .fg(Self::color(&self.colors.header_fg))
            .add_modifier(Modifier::BOLD)
    }

    /// Border style, brighter for the focused panel.
    #[must_use]
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(Self::color(&self.colors.border_focused))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Self::color(&self.colors.border))
        }
    }

    #[must_use]
    pub fn selection_style(&self) -> Style {
        Style::default()
            .fg(Self::color(&self.colors.selection_fg))
            .bg(Self::color(&self.colors.selection_bg))
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(Self::color(&self.colors.match_highlight_fg))
            .bg(Self::color(&self.colors.match_highlight_bg))
    }

    #[must_use]
    pub fn search_border(&self) -> Style {
        Style::default().fg(Self::color(&self.colors.search_bar_border))
    }

    #[must_use]
    pub fn empty_state(&self) -> Style {
        Style::default().fg(Self::color(&self.colors.empty_state_fg))
    }

    #[must_use]
    pub fn success(&self) -> Style {
        Style::default().fg(Self::color(&self.colors.success_fg))
    }

    #[must_use]
    pub fn error(&self) -> Style {
        Style::default()
            .fg(Self::color(&self.colors.error_fg))
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn secret(&self) -> Style {
        Style::default().fg(Self::color(&self.colors.secret_fg))
    }

    /// Base style for modal windows.
    #[must_use]
    pub fn modal(&self) -> Style {
        let style = self.text();
        match &self.colors.modal_bg {
            Some(bg) => style.bg(Self::color(bg)),
            None => style,
        }
    }
}

impl Default for Theme {
    /// Returns the default theme (Catppuccin Mocha).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the theme tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME)
            .expect("Built-in catppuccin-mocha theme should always parse")
    }
}
