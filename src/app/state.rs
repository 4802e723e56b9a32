//! Shared application state and vault coordination.
//!
//! This module defines [`AppState`], the single source of truth for everything
//! the UI displays: the cached credential list, the derived category index and
//! the current selections. All mutation goes through `AppState`; UI components
//! only read from it.
//!
//! # Architecture
//!
//! ```text
//!  UI thread ──► AppState::add ──► VaultService::add     (no lock held)
//!                     │        ──► VaultService::list    (no lock held)
//!                     ▼
//!               write lock ─► replace cache, recompute categories ─► unlock
//!                     │
//!                     ▼
//!               credentials-changed callback              (no lock held)
//! ```
//!
//! Every mutation follows *lock → mutate → unlock → notify*. The private
//! `commit` helper is the only place the write lock is taken for a mutation,
//! and it fires the notification after the guard is dropped, so a callback may
//! call back into any accessor without deadlocking.
//!
//! Each vault listing is stamped with a generation number taken before the
//! list call. When mutations run concurrently, a listing older than the one
//! already in the cache is discarded, so the cache never moves backwards.
//!
//! # Snapshots
//!
//! The cache is stored as `Arc<Vec<CredentialMetadata>>` and replaced
//! wholesale on every reload. Readers receive a clone of the `Arc`, which stays
//! valid and immutable no matter how many reloads happen afterwards. The
//! selected credential is likewise a copy: reloading or deleting does not
//! clear or refresh it.
//!
//! # Example
//!
//! ```no_run
//! use pass_tui::app::AppState;
//! use pass_tui::storage::JsonVault;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! let vault = Arc::new(JsonVault::open(PathBuf::from("/tmp/vault.json"))?);
//! let state = Arc::new(AppState::new(vault));
//!
//! let observer = Arc::clone(&state);
//! state.on_credentials_changed(move || {
//!     tracing::info!(count = observer.credentials().len(), "credentials reloaded");
//! });
//! state.load()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::domain::error::{PassTuiError, Result};
use crate::domain::{
    category_label, filter_by_category, Credential, CredentialMetadata, NewCredential,
    UpdateOptions,
};
use crate::storage::VaultService;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Listener for credential-list and selection changes.
pub type ChangeCallback = Arc<dyn Fn() + Send + Sync>;

/// Listener for vault failures surfaced by [`AppState`].
pub type ErrorCallback = Arc<dyn Fn(&PassTuiError) + Send + Sync>;

/// Which listener a committed mutation should fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notify {
    CredentialsChanged,
    SelectionChanged,
}

/// Fields guarded by the state lock.
#[derive(Default)]
struct StateInner {
    credentials: Arc<Vec<CredentialMetadata>>,
    categories: Arc<Vec<String>>,
    /// Generation of the listing currently in `credentials`.
    generation: u64,
    selected_category: Option<String>,
    selected_credential: Option<CredentialMetadata>,
    on_credentials_changed: Option<ChangeCallback>,
    on_selection_changed: Option<ChangeCallback>,
    on_error: Option<ErrorCallback>,
}

/// Central, thread-safe application state.
///
/// Shared between the event loop and UI components as `Arc<AppState>`. The
/// vault handle lives outside the lock and is never reassigned.
pub struct AppState {
    vault: Arc<dyn VaultService>,
    inner: RwLock<StateInner>,
    next_generation: AtomicU64,
}

impl AppState {
    /// Creates an empty state backed by `vault`.
    ///
    /// Nothing is read from the vault until [`AppState::load`] is called.
    #[must_use]
    pub fn new(vault: Arc<dyn VaultService>) -> Self {
        Self {
            vault,
            inner: RwLock::new(StateInner::default()),
            next_generation: AtomicU64::new(1),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StateInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StateInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `mutate` under the write lock, releases it, then fires `notify`
    /// if `mutate` reported a change.
    fn commit(&self, notify: Notify, mutate: impl FnOnce(&mut StateInner) -> bool) -> bool {
        let changed = {
            let mut inner = self.write();
            mutate(&mut inner)
        };
        if changed {
            self.notify(notify);
        }
        changed
    }

    fn notify(&self, notify: Notify) {
        let callback = {
            let inner = self.read();
            match notify {
                Notify::CredentialsChanged => inner.on_credentials_changed.clone(),
                Notify::SelectionChanged => inner.on_selection_changed.clone(),
            }
        };

        if let Some(callback) = callback {
            callback();
        }
    }

    /// Wraps `err` with `context`, routes it to the error listener and returns it.
    fn report(&self, context: &'static str, err: PassTuiError) -> PassTuiError {
        let err = PassTuiError::operation(context, err);
        tracing::warn!(error = %err, "vault operation failed");

        let callback = self.read().on_error.clone();
        if let Some(callback) = callback {
            callback(&err);
        }
        err
    }

    /// Replaces the cache and recomputes the category index in one commit,
    /// unless a newer listing has already been applied.
    fn replace_cache(&self, generation: u64, credentials: Vec<CredentialMetadata>) {
        let categories = derive_categories(&credentials);
        tracing::debug!(
            generation,
            credentials = credentials.len(),
            categories = categories.len(),
            "replacing credential cache"
        );

        let applied = self.commit(Notify::CredentialsChanged, move |inner| {
            if generation < inner.generation {
                return false;
            }
            inner.credentials = Arc::new(credentials);
            inner.categories = Arc::new(categories);
            inner.generation = generation;
            true
        });
        if !applied {
            tracing::debug!(generation, "discarding stale credential listing");
        }
    }

    /// Lists the vault and replaces the cache, reporting failures under `context`.
    fn fetch(&self, context: &'static str) -> Result<()> {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
        let credentials = self.vault.list().map_err(|e| self.report(context, e))?;
        self.replace_cache(generation, credentials);
        Ok(())
    }

    /// Re-reads the credential list from the vault after a successful write.
    fn reload(&self) -> Result<()> {
        self.fetch("failed to reload credentials")
    }

    /// Loads all credentials from the vault into the cache.
    ///
    /// On failure the cache is left untouched, the error listener fires and
    /// the wrapped error is returned. On success the credentials-changed
    /// listener fires after the lock is released.
    ///
    /// # Errors
    ///
    /// Returns the vault's list error wrapped as "failed to load credentials".
    pub fn load(&self) -> Result<()> {
        let _span = tracing::debug_span!("state_load").entered();

        self.fetch("failed to load credentials")
    }

    /// Adds a credential and reloads the cache.
    ///
    /// Required-field validation belongs to the caller (the add form); the
    /// vault may still reject the credential.
    ///
    /// # Errors
    ///
    /// Returns "failed to add credential" if the vault rejects the write, or
    /// "failed to reload credentials" if the follow-up list fails. The cache is
    /// unchanged in both cases.
    pub fn add(&self, credential: &NewCredential) -> Result<()> {
        let _span = tracing::debug_span!("state_add", service = %credential.service).entered();

        self.vault
            .add(credential)
            .map_err(|e| self.report("failed to add credential", e))?;
        self.reload()
    }

    /// Updates a credential and reloads the cache.
    ///
    /// # Errors
    ///
    /// Returns "failed to update credential" if the vault rejects the update,
    /// or "failed to reload credentials" if the follow-up list fails.
    pub fn update(&self, service: &str, options: &UpdateOptions) -> Result<()> {
        let _span = tracing::debug_span!("state_update", service = %service).entered();

        self.vault
            .update(service, options)
            .map_err(|e| self.report("failed to update credential", e))?;
        self.reload()
    }

    /// Deletes a credential and reloads the cache.
    ///
    /// The selected credential is not cleared, even if it is the one deleted.
    ///
    /// # Errors
    ///
    /// Returns "failed to delete credential" if the service is unknown or the
    /// vault write fails, or "failed to reload credentials" if the follow-up
    /// list fails.
    pub fn delete(&self, service: &str) -> Result<()> {
        let _span = tracing::debug_span!("state_delete", service = %service).entered();

        self.vault
            .delete(service)
            .map_err(|e| self.report("failed to delete credential", e))?;
        self.reload()
    }

    /// Fetches a credential including its password.
    ///
    /// Pass `track = false` when pre-populating form fields and `true` when
    /// the user reveals or copies the secret.
    ///
    /// # Errors
    ///
    /// Returns the vault error wrapped as "failed to get credential".
    pub fn get_full_credential(&self, service: &str, track: bool) -> Result<Credential> {
        let _span =
            tracing::debug_span!("state_get_full", service = %service, track = track).entered();

        self.vault
            .get(service, track)
            .map_err(|e| self.report("failed to get credential", e))
    }

    /// Returns a snapshot of the cached credentials.
    #[must_use]
    pub fn credentials(&self) -> Arc<Vec<CredentialMetadata>> {
        Arc::clone(&self.read().credentials)
    }

    /// Returns the sorted, deduplicated category labels of the cache.
    #[must_use]
    pub fn categories(&self) -> Arc<Vec<String>> {
        Arc::clone(&self.read().categories)
    }

    /// Returns the credentials in the selected category, or all of them when
    /// no category is selected.
    #[must_use]
    pub fn visible_credentials(&self) -> Vec<CredentialMetadata> {
        let (credentials, category) = {
            let inner = self.read();
            (Arc::clone(&inner.credentials), inner.selected_category.clone())
        };
        filter_by_category(&credentials, category.as_deref())
    }

    #[must_use]
    pub fn selected_category(&self) -> Option<String> {
        self.read().selected_category.clone()
    }

    /// Sets the category filter (`None` = all credentials).
    ///
    /// The value is not validated against the current categories.
    pub fn set_selected_category(&self, category: Option<String>) {
        tracing::debug!(category = ?category, "category selected");
        self.commit(Notify::SelectionChanged, move |inner| {
            inner.selected_category = category;
            true
        });
    }

    #[must_use]
    pub fn selected_credential(&self) -> Option<CredentialMetadata> {
        self.read().selected_credential.clone()
    }

    /// Stores a snapshot of the selected credential.
    ///
    /// The snapshot is independent of the cache: later reloads neither update
    /// nor clear it.
    pub fn set_selected_credential(&self, credential: Option<CredentialMetadata>) {
        tracing::debug!(
            service = credential.as_ref().map_or("", |c| c.service.as_str()),
            "credential selected"
        );
        self.commit(Notify::SelectionChanged, move |inner| {
            inner.selected_credential = credential;
            true
        });
    }

    /// Registers the credentials-changed listener, replacing any previous one.
    pub fn on_credentials_changed<F>(&self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.write().on_credentials_changed = Some(Arc::new(callback));
    }

    /// Registers the selection-changed listener, replacing any previous one.
    pub fn on_selection_changed<F>(&self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.write().on_selection_changed = Some(Arc::new(callback));
    }

    /// Registers the error listener, replacing any previous one.
    pub fn on_error<F>(&self, callback: F)
    where
        F: Fn(&PassTuiError) + Send + Sync + 'static,
    {
        self.write().on_error = Some(Arc::new(callback));
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.read();
        f.debug_struct("AppState")
            .field("credentials", &inner.credentials.len())
            .field("categories", &inner.categories)
            .field("selected_category", &inner.selected_category)
            .field(
                "selected_credential",
                &inner.selected_credential.as_ref().map(|c| &c.service),
            )
            .finish_non_exhaustive()
    }
}

/// Returns the sorted set of category labels across `credentials`.
fn derive_categories(credentials: &[CredentialMetadata]) -> Vec<String> {
    credentials
        .iter()
        .map(|c| category_label(&c.category).to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UNCATEGORIZED;

    #[test]
    fn categories_are_sorted_labels() {
        let creds = vec![
            CredentialMetadata::new("c", "", "work"),
            CredentialMetadata::new("a", "", ""),
            CredentialMetadata::new("b", "", "dev"),
            CredentialMetadata::new("d", "", "dev"),
        ];
        assert_eq!(
            derive_categories(&creds),
            vec![UNCATEGORIZED.to_string(), "dev".into(), "work".into()]
        );
    }

    #[test]
    fn older_listing_does_not_replace_newer_one() {
        struct EmptyVault;
        impl VaultService for EmptyVault {
            fn list(&self) -> Result<Vec<CredentialMetadata>> {
                Ok(Vec::new())
            }
            fn add(&self, _: &NewCredential) -> Result<()> {
                Ok(())
            }
            fn update(&self, _: &str, _: &UpdateOptions) -> Result<()> {
                Ok(())
            }
            fn delete(&self, _: &str) -> Result<()> {
                Ok(())
            }
            fn get(&self, service: &str, _: bool) -> Result<Credential> {
                Err(PassTuiError::NotFound(service.into()))
            }
        }

        let state = AppState::new(Arc::new(EmptyVault));
        let notified = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&notified);
        state.on_credentials_changed(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let newer = vec![
            CredentialMetadata::new("a", "", ""),
            CredentialMetadata::new("b", "", "dev"),
        ];
        state.replace_cache(2, newer.clone());
        state.replace_cache(1, vec![CredentialMetadata::new("a", "", "")]);

        assert_eq!(*state.credentials(), newer);
        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_cache_has_no_categories() {
        assert!(derive_categories(&[]).is_empty());
    }
}
