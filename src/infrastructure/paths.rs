//! Filesystem locations used by pass-tui.
//!
//! All platform-specific directory lookups go through the `dirs` crate:
//!
//! | Purpose | Location |
//! |---|---|
//! | Configuration | `<config_dir>/pass-tui/config.toml` |
//! | Vault | `<data_dir>/pass-tui/vault.json` (or `$PASS_TUI_VAULT`) |
//! | Log file | `<data_dir>/pass-tui/pass-tui.log` |
//!
//! The module also resolves the "access location" recorded in usage
//! statistics: the working directory and, if it sits inside a git checkout,
//! the repository name.

use std::path::{Path, PathBuf};

/// Directory name under the platform config and data directories.
pub const APP_DIR: &str = "pass-tui";

/// Environment variable overriding the vault file location.
pub const VAULT_ENV: &str = "PASS_TUI_VAULT";

/// Returns the configuration directory, falling back to `./.pass-tui`.
#[must_use]
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir().map_or_else(|| PathBuf::from(".pass-tui"), |dir| dir.join(APP_DIR))
}

/// Returns the data directory, falling back to `./.pass-tui`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".pass-tui"), |dir| dir.join(APP_DIR))
}

#[must_use]
pub fn config_file() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Returns the vault path, honoring [`VAULT_ENV`] when set and non-empty.
///
/// # Examples
///
/// ```
/// use pass_tui::infrastructure::paths::vault_file;
///
/// assert!(vault_file().ends_with("vault.json") || std::env::var_os("PASS_TUI_VAULT").is_some());
/// ```
#[must_use]
pub fn vault_file() -> PathBuf {
    match std::env::var_os(VAULT_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => get_data_dir().join("vault.json"),
    }
}

#[must_use]
pub fn log_file() -> PathBuf {
    get_data_dir().join("pass-tui.log")
}

/// Returns the current working directory, or `.` if it cannot be determined.
#[must_use]
pub fn current_location() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Returns the name of the git repository enclosing `path`, if any.
///
/// Walks up from `path` looking for a `.git` entry (directory or worktree
/// file) and returns the name of the directory that contains it.
#[must_use]
pub fn git_repo_name(path: &Path) -> Option<String> {
    path.ancestors()
        .find(|dir| dir.join(".git").exists())
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn git_repo_found_from_nested_dir() {
        let dir = TempDir::new().unwrap();
        let repo = dir.path().join("my-repo");
        let nested = repo.join("src").join("bin");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::create_dir_all(repo.join(".git")).unwrap();

        assert_eq!(git_repo_name(&nested).as_deref(), Some("my-repo"));
    }

    #[test]
    fn no_repo_outside_checkout() {
        let dir = TempDir::new().unwrap();
        let plain = dir.path().join("plain");
        std::fs::create_dir_all(&plain).unwrap();
        // The temp dir itself may live under a checkout on some machines.
        if dir.path().ancestors().all(|p| !p.join(".git").exists()) {
            assert_eq!(git_repo_name(&plain), None);
        }
    }

    #[test]
    fn files_live_under_app_dir() {
        assert!(config_file().ends_with("config.toml"));
        assert_eq!(config_file().parent(), Some(get_config_dir().as_path()));
        assert_eq!(log_file().parent(), Some(get_data_dir().as_path()));
    }
}
