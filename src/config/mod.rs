//! Configuration loading and validation.
//!
//! pass-tui reads an optional TOML file from
//! `<config_dir>/pass-tui/config.toml`. Every key is optional; missing keys
//! take their built-in defaults and the `[keybindings]` table is merged over
//! the default bindings action by action.
//!
//! # Format
//!
//! ```toml
//! theme = "catppuccin-mocha"      # or dracula, catppuccin-latte
//! theme_file = "/path/theme.toml" # takes precedence over `theme`
//! log_level = "info"              # overridden by RUST_LOG
//!
//! [terminal]
//! warning_enabled = true
//! min_width = 60
//! min_height = 30
//!
//! [layout]
//! medium_breakpoint = 80
//! large_breakpoint = 120
//!
//! [keybindings]
//! add_credential = "ctrl+n"
//! ```
//!
//! # Failure Handling
//!
//! Loading never fails hard. A file that is too large, unreadable,
//! unparsable or invalid yields the default configuration together with a
//! [`ValidationResult`] describing why, which the UI shows on startup.

pub mod keys;

pub use keys::KeyBinding;

use crate::app::Action;
use crate::ui::layout::{DEFAULT_LARGE_BREAKPOINT, DEFAULT_MEDIUM_BREAKPOINT};
use crate::ui::Theme;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

/// Config files larger than this are ignored.
pub const MAX_CONFIG_SIZE_BYTES: u64 = 100 * 1024;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme: String,
    /// Path to a custom TOML theme file.
    pub theme_file: Option<PathBuf>,
    /// Tracing filter used when `RUST_LOG` is unset. Default: `"info"`.
    pub log_level: Option<String>,
    pub terminal: TerminalConfig,
    pub layout: LayoutConfig,
    /// Action name → key string.
    pub keybindings: BTreeMap<String, String>,
}

/// Minimum terminal size warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub warning_enabled: bool,
    pub min_width: u32,
    pub min_height: u32,
}

/// Layout breakpoints in columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub medium_breakpoint: u16,
    pub large_breakpoint: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: crate::ui::theme::DEFAULT_THEME.to_string(),
            theme_file: None,
            log_level: None,
            terminal: TerminalConfig::default(),
            layout: LayoutConfig::default(),
            keybindings: default_keybindings(),
        }
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            warning_enabled: true,
            min_width: 60,
            min_height: 30,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            medium_breakpoint: DEFAULT_MEDIUM_BREAKPOINT,
            large_breakpoint: DEFAULT_LARGE_BREAKPOINT,
        }
    }
}

/// Default `[keybindings]` table.
#[must_use]
pub fn default_keybindings() -> BTreeMap<String, String> {
    Action::ALL
        .iter()
        .map(|a| (a.name().to_string(), a.default_key().to_string()))
        .collect()
}

/// A single validation finding tied to a config field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted field path, e.g. `"terminal.min_width"`.
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of loading and checking a configuration.
///
/// Errors make the configuration unusable (defaults are used instead);
/// warnings are informational.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(field: &str, message: String) -> Self {
        Self {
            errors: vec![ValidationIssue::new(field, message)],
            warnings: Vec::new(),
        }
    }
}

impl Config {
    /// Loads the configuration from the default location.
    #[must_use]
    pub fn load() -> (Self, ValidationResult) {
        Self::load_from_path(&crate::infrastructure::paths::config_file())
    }

    /// Loads and validates the configuration at `path`.
    ///
    /// A missing file is not an error. Every other failure returns the
    /// defaults plus the reason.
    #[must_use]
    pub fn load_from_path(path: &Path) -> (Self, ValidationResult) {
        let _span = tracing::debug_span!("config_load", path = %path.display()).entered();

        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config file, using defaults");
                return (Self::default(), ValidationResult::default());
            }
            Err(e) => {
                return (
                    Self::default(),
                    ValidationResult::error("config_file", format!("cannot access config file: {e}")),
                );
            }
        };

        if metadata.len() > MAX_CONFIG_SIZE_BYTES {
            return (
                Self::default(),
                ValidationResult::error(
                    "config_file",
                    format!(
                        "config file too large (size: {} KB, max: {} KB)",
                        metadata.len() / 1024,
                        MAX_CONFIG_SIZE_BYTES / 1024
                    ),
                ),
            );
        }

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                return (
                    Self::default(),
                    ValidationResult::error("config_file", format!("failed to read config file: {e}")),
                );
            }
        };

        let config = match Self::from_toml_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                return (
                    Self::default(),
                    ValidationResult::error("config_file", format!("failed to parse TOML: {e}")),
                );
            }
        };

        let result = config.validate();
        if result.is_valid() {
            tracing::debug!(warnings = result.warnings.len(), "config loaded");
            (config, result)
        } else {
            tracing::warn!(errors = result.errors.len(), "config invalid, using defaults");
            (Self::default(), result)
        }
    }

    /// Parses TOML and merges keybindings over the defaults.
    ///
    /// # Errors
    ///
    /// Returns the TOML deserialization error.
    pub fn from_toml_str(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(contents)?;
        let mut keybindings = default_keybindings();
        keybindings.extend(std::mem::take(&mut config.keybindings));
        config.keybindings = keybindings;
        Ok(config)
    }

    /// Checks value ranges, breakpoints, keybindings and theme.
    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();
        self.validate_terminal(&mut result);
        self.validate_layout(&mut result);
        self.validate_keybindings(&mut result);
        self.validate_appearance(&mut result);
        result
    }

    fn validate_terminal(&self, result: &mut ValidationResult) {
        let TerminalConfig {
            min_width,
            min_height,
            ..
        } = self.terminal;

        if !(1..=10_000).contains(&min_width) {
            result.errors.push(ValidationIssue::new(
                "terminal.min_width",
                format!("must be between 1 and 10000 (got: {min_width})"),
            ));
        }
        if !(1..=1_000).contains(&min_height) {
            result.errors.push(ValidationIssue::new(
                "terminal.min_height",
                format!("must be between 1 and 1000 (got: {min_height})"),
            ));
        }
        if min_width > 500 {
            result.warnings.push(ValidationIssue::new(
                "terminal.min_width",
                format!("unusually large value ({min_width}) - most terminals are <300 columns"),
            ));
        }
        if min_height > 200 {
            result.warnings.push(ValidationIssue::new(
                "terminal.min_height",
                format!("unusually large value ({min_height}) - most terminals are <100 rows"),
            ));
        }
    }

    fn validate_layout(&self, result: &mut ValidationResult) {
        let LayoutConfig {
            medium_breakpoint,
            large_breakpoint,
        } = self.layout;
        if medium_breakpoint >= large_breakpoint {
            result.errors.push(ValidationIssue::new(
                "layout.medium_breakpoint",
                format!(
                    "must be less than layout.large_breakpoint ({medium_breakpoint} >= {large_breakpoint})"
                ),
            ));
        }
    }

    fn validate_keybindings(&self, result: &mut ValidationResult) {
        let mut seen: HashMap<KeyBinding, &str> = HashMap::new();

        for (action, key) in &self.keybindings {
            let field = format!("keybindings.{action}");

            if Action::from_name(action).is_none() {
                result
                    .warnings
                    .push(ValidationIssue::new(field.clone(), "unknown action, ignored"));
                continue;
            }

            match key.parse::<KeyBinding>() {
                Ok(binding) => {
                    if let Some(other) = seen.insert(binding, action) {
                        result.errors.push(ValidationIssue::new(
                            field,
                            format!("conflicts with keybindings.{other} (both use '{binding}')"),
                        ));
                    }
                }
                Err(e) => result.errors.push(ValidationIssue::new(field, e.to_string())),
            }
        }
    }

    fn validate_appearance(&self, result: &mut ValidationResult) {
        if self.theme_file.is_none() && Theme::from_name(&self.theme).is_none() {
            result.warnings.push(ValidationIssue::new(
                "theme",
                format!("unknown theme '{}', using default", self.theme),
            ));
        }
        if let Some(level) = &self.log_level {
            if tracing_subscriber::EnvFilter::try_new(level).is_err() {
                result.warnings.push(ValidationIssue::new(
                    "log_level",
                    format!("invalid filter '{level}', using info"),
                ));
            }
        }
    }

    /// Resolves the configured theme, falling back to the default.
    #[must_use]
    pub fn resolve_theme(&self) -> Theme {
        self.theme_file.as_ref().map_or_else(
            || {
                Theme::from_name(&self.theme).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %self.theme, "unknown theme, using default");
                    Theme::default()
                })
            },
            |theme_file| {
                Theme::from_file(theme_file).unwrap_or_else(|e| {
                    tracing::debug!(theme_file = %theme_file.display(), error = %e, "failed to load theme from file, using default");
                    Theme::default()
                })
            },
        )
    }
}
