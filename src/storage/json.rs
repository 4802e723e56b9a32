//! JSON file-based vault backend.
//!
//! This module provides a simple, human-readable vault implementation using
//! JSON serialization. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes. The file is not encrypted; on Unix it is
//! written with owner-only permissions.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - loads entire file into memory once
//! - **Write**: O(n) - serializes and writes entire dataset
//! - **Best for**: personal vaults with a few thousand entries

use crate::domain::error::{PassTuiError, Result};
use crate::domain::{Credential, CredentialMetadata, NewCredential, UpdateOptions};
use crate::infrastructure::paths;
use crate::storage::backend::VaultService;
use crate::storage::models::CredentialRecord;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

/// JSON vault container format.
///
/// This is the top-level structure serialized to disk. Credentials are keyed by
/// service name so iteration order, and therefore the listed order, is stable.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VaultData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// All stored credentials, indexed by service.
    #[serde(default)]
    credentials: BTreeMap<String, CredentialRecord>,
}

impl Default for VaultData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            credentials: BTreeMap::new(),
        }
    }
}

/// JSON file vault backend.
///
/// Stores credentials in a JSON file with atomic writes. The entire dataset is
/// kept in memory behind a mutex and persisted after every modification, so the
/// vault can be shared across threads as `Arc<dyn VaultService>`.
///
/// A modification whose save fails is undone in memory before the error is
/// returned, so the in-memory data always matches the last successful write.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "credentials": {
///     "github": {
///       "service": "github",
///       "username": "octocat",
///       "password": "hunter2",
///       "category": "dev",
///       "url": "https://github.com",
///       "notes": "",
///       "created_at": "2024-01-01T00:00:00Z",
///       "updated_at": "2024-01-01T00:00:00Z",
///       "modified_count": 0,
///       "usage": {
///         "/home/me/src/app": {
///           "location": "/home/me/src/app",
///           "timestamp": "2024-01-02T00:00:00Z",
///           "count": 3,
///           "git_repo": "app",
///           "field_access": { "password": 3 }
///         }
///       }
///     }
///   }
/// }
/// ```
pub struct JsonVault {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    data: Mutex<VaultData>,

    /// Fixed access location, used instead of the working directory when set.
    location: Option<String>,
}

impl JsonVault {
    /// Creates or opens a JSON vault.
    ///
    /// If the file exists, loads existing data. Otherwise starts with an empty
    /// vault; the file is created on the first write. Parent directories are
    /// created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pass_tui::storage::JsonVault;
    /// use std::path::PathBuf;
    ///
    /// let vault = JsonVault::open(PathBuf::from("/tmp/vault.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON vault");

        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                tracing::debug!(parent = ?parent, "creating parent directory");
                std::fs::create_dir_all(parent)?;
            }
        }

        let data = if file_path.exists() {
            tracing::debug!("loading existing vault");
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty vault");
            VaultData::default()
        };

        tracing::debug!(credential_count = data.credentials.len(), "vault opened");

        Ok(Self {
            file_path,
            data: Mutex::new(data),
            location: None,
        })
    }

    /// Pins the location recorded for tracked accesses.
    ///
    /// By default the process working directory is used.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn lock(&self) -> MutexGuard<'_, VaultData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads vault data from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    fn load_from_file(path: &Path) -> Result<VaultData> {
        let contents = std::fs::read_to_string(path)?;
        let data: VaultData = serde_json::from_str(&contents)
            .map_err(|e| PassTuiError::Storage(format!("failed to parse vault JSON: {e}")))?;

        if data.version > FORMAT_VERSION {
            return Err(PassTuiError::Storage(format!(
                "unsupported vault version {} (expected <= {FORMAT_VERSION})",
                data.version
            )));
        }

        tracing::debug!(
            version = data.version,
            credentials = data.credentials.len(),
            "loaded vault data"
        );

        Ok(data)
    }

    /// Saves vault data to disk using atomic write.
    ///
    /// Writes to a temporary file first, then atomically renames it to the target path.
    /// This ensures the file is never left in a corrupt state, even if the process crashes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - JSON serialization fails
    /// - Temporary file cannot be written
    /// - Rename operation fails
    fn save_to_file(&self, data: &VaultData) -> Result<()> {
        tracing::debug!(path = ?self.file_path, "saving vault data");

        let json = serde_json::to_string_pretty(data)
            .map_err(|e| PassTuiError::Storage(format!("failed to serialize vault JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        restrict_permissions(&tmp_path)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!("vault saved successfully");
        Ok(())
    }

    /// Saves `data`, running `rollback` on it if the save fails.
    ///
    /// `rollback` must restore the state from before the modification.
    fn persist(&self, data: &mut VaultData, rollback: impl FnOnce(&mut VaultData)) -> Result<()> {
        match self.save_to_file(data) {
            Ok(()) => Ok(()),
            Err(e) => {
                rollback(data);
                tracing::warn!(error = %e, "save failed, modification rolled back");
                Err(e)
            }
        }
    }

    /// Returns the location and enclosing git repository for a tracked access.
    fn access_location(&self) -> (String, Option<String>) {
        match &self.location {
            Some(location) => (location.clone(), None),
            None => {
                let cwd = paths::current_location();
                let repo = paths::git_repo_name(&cwd);
                (cwd.display().to_string(), repo)
            }
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

impl VaultService for JsonVault {
    fn list(&self) -> Result<Vec<CredentialMetadata>> {
        let _span = tracing::debug_span!("json_list").entered();

        let credentials: Vec<CredentialMetadata> = self
            .lock()
            .credentials
            .values()
            .map(CredentialRecord::to_metadata)
            .collect();

        tracing::debug!(count = credentials.len(), "listed credentials");
        Ok(credentials)
    }

    fn add(&self, credential: &NewCredential) -> Result<()> {
        let _span = tracing::debug_span!("json_add", service = %credential.service).entered();

        credential.validate()?;
        let service = credential.service.trim();

        let mut data = self.lock();
        if data.credentials.contains_key(service) {
            return Err(PassTuiError::AlreadyExists(service.to_string()));
        }

        let record = CredentialRecord::from_new(credential, Utc::now());
        let key = record.service.clone();
        data.credentials.insert(key.clone(), record);
        self.persist(&mut data, |data| {
            data.credentials.remove(&key);
        })?;

        tracing::debug!("credential added");
        Ok(())
    }

    fn update(&self, service: &str, options: &UpdateOptions) -> Result<()> {
        let _span = tracing::debug_span!("json_update", service = %service).entered();

        if options.password.as_set().is_some_and(String::is_empty) {
            return Err(PassTuiError::InvalidCredential(
                "password cannot be empty".into(),
            ));
        }

        let mut data = self.lock();
        let record = data
            .credentials
            .get_mut(service)
            .ok_or_else(|| PassTuiError::NotFound(service.to_string()))?;
        let previous = record.clone();

        // Evaluate every field; `|` does not short-circuit.
        let changed = options.username.apply_to(&mut record.username)
            | options.password.apply_to(&mut record.password)
            | options.category.apply_to(&mut record.category)
            | options.url.apply_to(&mut record.url)
            | options.notes.apply_to(&mut record.notes);

        if changed {
            record.modified_count = record.modified_count.saturating_add(1);
            record.updated_at = Utc::now();
            let modified_count = record.modified_count;
            self.persist(&mut data, |data| {
                data.credentials.insert(service.to_string(), previous);
            })?;
            tracing::debug!(modified_count = modified_count, "credential updated");
        } else {
            tracing::debug!("update changed no fields");
        }

        Ok(())
    }

    fn delete(&self, service: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_delete", service = %service).entered();

        let mut data = self.lock();
        let removed = data
            .credentials
            .remove(service)
            .ok_or_else(|| PassTuiError::NotFound(service.to_string()))?;
        self.persist(&mut data, |data| {
            data.credentials.insert(service.to_string(), removed);
        })?;

        tracing::debug!("credential deleted");
        Ok(())
    }

    fn get(&self, service: &str, track: bool) -> Result<Credential> {
        let _span = tracing::debug_span!("json_get", service = %service, track = track).entered();

        let location = if track { Some(self.access_location()) } else { None };

        let mut data = self.lock();
        let record = data
            .credentials
            .get_mut(service)
            .ok_or_else(|| PassTuiError::NotFound(service.to_string()))?;

        if let Some((location, git_repo)) = location {
            let previous = record.clone();
            record.record_access(&location, git_repo, "password", Utc::now());
            let credential = record.to_credential();
            self.persist(&mut data, |data| {
                data.credentials.insert(service.to_string(), previous);
            })?;
            tracing::debug!(location = %location, "access recorded");
            return Ok(credential);
        }

        Ok(record.to_credential())
    }
}

impl std::fmt::Debug for JsonVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonVault")
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldUpdate;
    use tempfile::TempDir;

    fn new_credential(service: &str, category: &str) -> NewCredential {
        NewCredential {
            service: service.into(),
            username: "user".into(),
            password: "secret".into(),
            category: category.into(),
            url: "https://example.com".into(),
            notes: "note".into(),
        }
    }

    fn open(dir: &TempDir) -> JsonVault {
        JsonVault::open(dir.path().join("nested").join("vault.json"))
            .unwrap()
            .with_location("/work/project")
    }

    #[test]
    fn add_get_and_reopen() {
        let dir = TempDir::new().unwrap();
        let vault = open(&dir);
        vault.add(&new_credential("github", "dev")).unwrap();

        let cred = vault.get("github", false).unwrap();
        assert_eq!(cred.password, "secret");
        assert_eq!(cred.metadata.category, "dev");
        drop(vault);

        let reopened = open(&dir);
        let list = reopened.list().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].service, "github");
    }

    #[test]
    fn duplicate_service_is_rejected() {
        let dir = TempDir::new().unwrap();
        let vault = open(&dir);
        vault.add(&new_credential("github", "")).unwrap();
        let err = vault.add(&new_credential("github", "")).unwrap_err();
        assert!(matches!(err, PassTuiError::AlreadyExists(s) if s == "github"));
    }

    #[test]
    fn empty_password_is_rejected() {
        let dir = TempDir::new().unwrap();
        let vault = open(&dir);
        let mut cred = new_credential("github", "");
        cred.password.clear();
        assert!(matches!(
            vault.add(&cred),
            Err(PassTuiError::InvalidCredential(_))
        ));
    }

    #[test]
    fn update_keep_preserves_and_set_empty_clears() {
        let dir = TempDir::new().unwrap();
        let vault = open(&dir);
        vault.add(&new_credential("github", "dev")).unwrap();

        let opts = UpdateOptions {
            notes: FieldUpdate::Set(String::new()),
            url: FieldUpdate::Keep,
            ..UpdateOptions::default()
        };
        vault.update("github", &opts).unwrap();

        let meta = &vault.list().unwrap()[0];
        assert_eq!(meta.notes, "");
        assert_eq!(meta.url, "https://example.com");
        assert_eq!(meta.category, "dev");
        assert_eq!(meta.modified_count, 1);
    }

    #[test]
    fn update_without_changes_keeps_modified_count() {
        let dir = TempDir::new().unwrap();
        let vault = open(&dir);
        vault.add(&new_credential("github", "dev")).unwrap();

        let opts = UpdateOptions {
            category: FieldUpdate::Set("dev".into()),
            ..UpdateOptions::default()
        };
        vault.update("github", &opts).unwrap();
        assert_eq!(vault.list().unwrap()[0].modified_count, 0);
    }

    #[test]
    fn missing_service_errors() {
        let dir = TempDir::new().unwrap();
        let vault = open(&dir);
        assert!(matches!(vault.delete("nope"), Err(PassTuiError::NotFound(_))));
        assert!(matches!(vault.get("nope", true), Err(PassTuiError::NotFound(_))));
        assert!(matches!(
            vault.update("nope", &UpdateOptions::default()),
            Err(PassTuiError::NotFound(_))
        ));
    }

    #[test]
    fn tracked_get_records_usage() {
        let dir = TempDir::new().unwrap();
        let vault = open(&dir);
        vault.add(&new_credential("github", "")).unwrap();

        vault.get("github", false).unwrap();
        assert_eq!(vault.list().unwrap()[0].usage_count, 0);
        assert!(vault.list().unwrap()[0].last_accessed.is_none());

        vault.get("github", true).unwrap();
        vault.get("github", true).unwrap();
        let meta = &vault.list().unwrap()[0];
        assert_eq!(meta.usage_count, 2);
        assert!(meta.last_accessed.is_some());
        assert_eq!(meta.locations, vec!["/work/project".to_string()]);
    }

    #[test]
    fn delete_removes_credential() {
        let dir = TempDir::new().unwrap();
        let vault = open(&dir);
        vault.add(&new_credential("a", "")).unwrap();
        vault.add(&new_credential("b", "")).unwrap();
        vault.delete("a").unwrap();

        let services: Vec<String> = vault.list().unwrap().into_iter().map(|c| c.service).collect();
        assert_eq!(services, vec!["b".to_string()]);
    }

    /// Makes every save fail by occupying the temporary file path with a directory.
    fn block_saves(vault: &JsonVault) -> PathBuf {
        let blocker = vault.path().with_extension("tmp");
        std::fs::create_dir(&blocker).unwrap();
        blocker
    }

    #[test]
    fn failed_add_leaves_vault_unchanged() {
        let dir = TempDir::new().unwrap();
        let vault = open(&dir);
        let blocker = block_saves(&vault);

        assert!(matches!(
            vault.add(&new_credential("github", "dev")),
            Err(PassTuiError::Io(_))
        ));
        assert!(vault.list().unwrap().is_empty());

        std::fs::remove_dir(blocker).unwrap();
        vault.add(&new_credential("github", "dev")).unwrap();
        assert_eq!(vault.list().unwrap().len(), 1);
    }

    #[test]
    fn failed_update_delete_and_tracking_are_rolled_back() {
        let dir = TempDir::new().unwrap();
        let vault = open(&dir);
        vault.add(&new_credential("github", "dev")).unwrap();
        let before = vault.list().unwrap();
        let blocker = block_saves(&vault);

        let opts = UpdateOptions {
            category: FieldUpdate::Set("ops".into()),
            ..UpdateOptions::default()
        };
        assert!(vault.update("github", &opts).is_err());
        assert!(vault.delete("github").is_err());
        assert!(vault.get("github", true).is_err());
        assert_eq!(vault.list().unwrap(), before);

        std::fs::remove_dir(blocker).unwrap();
        drop(vault);
        let reopened = open(&dir);
        assert_eq!(reopened.list().unwrap(), before);
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(JsonVault::open(path), Err(PassTuiError::Storage(_))));
    }
}
