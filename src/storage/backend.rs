//! Vault backend abstraction.
//!
//! This module defines the [`VaultService`] trait, the collaborator the
//! application state talks to for every persistent operation. Keeping it a
//! trait lets the state layer be exercised against an in-memory mock in tests
//! and against [`JsonVault`](crate::storage::JsonVault) in the binary.
//!
//! # Design
//!
//! Methods take `&self` so one vault can be shared as `Arc<dyn VaultService>`
//! between the application state and anything else that needs it.
//! Implementations synchronize internally.

use crate::domain::error::Result;
use crate::domain::{Credential, CredentialMetadata, NewCredential, UpdateOptions};

/// Abstraction over credential storage backends.
///
/// Every method may fail; those failures are the only errors the application
/// state propagates.
///
/// # Implementations
///
/// - [`JsonVault`](crate::storage::JsonVault): JSON file with atomic writes
///
/// # Examples
///
/// ```no_run
/// use pass_tui::storage::{JsonVault, VaultService};
/// use std::path::PathBuf;
///
/// let vault = JsonVault::open(PathBuf::from("/tmp/vault.json"))?;
/// let credentials = vault.list()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait VaultService: Send + Sync {
    /// Returns metadata for every stored credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn list(&self) -> Result<Vec<CredentialMetadata>>;

    /// Stores a new credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the service name or password is empty, if a
    /// credential with the same service already exists, or if persisting fails.
    fn add(&self, credential: &NewCredential) -> Result<()>;

    /// Applies `options` to the credential stored under `service`.
    ///
    /// Fields set to `Keep` are untouched; `Set("")` clears a field.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unknown or persisting fails.
    fn update(&self, service: &str, options: &UpdateOptions) -> Result<()>;

    /// Removes the credential stored under `service`.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unknown or persisting fails.
    fn delete(&self, service: &str) -> Result<()>;

    /// Fetches the full credential including its password.
    ///
    /// When `track` is `true` the access is recorded in the usage statistics;
    /// callers pass `false` when pre-populating UI fields so that editing a
    /// credential does not count as using it.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unknown or, when tracking, if
    /// persisting the usage record fails.
    fn get(&self, service: &str, track: bool) -> Result<Credential>;
}
