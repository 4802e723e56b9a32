//! Credential domain model.
//!
//! This module defines the credential types shared by the vault backend, the
//! application state and the UI. Two projections exist:
//!
//! - [`CredentialMetadata`]: everything except the secret. This is what the
//!   application caches and renders in lists.
//! - [`Credential`]: metadata plus the password. Fetched on demand and never
//!   cached.
//!
//! Updates are described by [`UpdateOptions`], whose fields use
//! [`FieldUpdate`] to distinguish "leave unchanged" from "set to this value"
//! (including the empty string, which clears a field).
//!
//! # Categories
//!
//! A credential with an empty category belongs to the synthetic
//! [`UNCATEGORIZED`] bucket. [`category_label`] and [`category_from_label`]
//! convert between the stored value and the label shown in the UI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display label for credentials without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

/// Credential projection without the secret.
///
/// `service` is the unique key within a vault. Instances held by the UI are
/// snapshots: they are copied out of the application state and never updated
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialMetadata {
    /// Unique service name (e.g. "github").
    pub service: String,
    /// Account name for the service.
    pub username: String,
    /// Free-form category, empty when uncategorized.
    pub category: String,
    /// Optional login URL, empty when unset.
    pub url: String,
    /// Optional notes, empty when unset.
    pub notes: String,
    /// When the credential was first stored.
    pub created_at: DateTime<Utc>,
    /// When any field last changed.
    pub updated_at: DateTime<Utc>,
    /// Number of updates that actually changed a field.
    pub modified_count: u32,
    /// Total number of tracked accesses across all locations.
    pub usage_count: u32,
    /// Most recent tracked access, `None` if never accessed.
    pub last_accessed: Option<DateTime<Utc>>,
    /// Locations (working directories) the credential was accessed from.
    pub locations: Vec<String>,
}

impl CredentialMetadata {
    /// Creates metadata with the given identity fields and both timestamps set to now.
    ///
    /// # Example
    ///
    /// ```
    /// use pass_tui::domain::CredentialMetadata;
    ///
    /// let meta = CredentialMetadata::new("github", "octocat", "dev");
    /// assert_eq!(meta.category_label(), "dev");
    /// assert!(meta.last_accessed.is_none());
    /// ```
    #[must_use]
    pub fn new(service: &str, username: &str, category: &str) -> Self {
        let now = Utc::now();
        Self {
            service: service.to_string(),
            username: username.to_string(),
            category: category.to_string(),
            created_at: now,
            updated_at: now,
            ..Self::default()
        }
    }

    /// Returns the category label shown in the UI.
    #[must_use]
    pub fn category_label(&self) -> &str {
        category_label(&self.category)
    }

    /// Formats [`Self::last_accessed`] relative to now, or `"Never"`.
    #[must_use]
    pub fn last_used(&self) -> String {
        self.last_accessed
            .map_or_else(|| "Never".to_string(), |at| time_ago(at, Utc::now()))
    }
}

/// A credential including its password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Everything except the secret.
    pub metadata: CredentialMetadata,
    /// The secret itself.
    pub password: String,
}

/// Input for creating a credential.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCredential {
    pub service: String,
    pub username: String,
    pub password: String,
    pub category: String,
    pub url: String,
    pub notes: String,
}

impl NewCredential {
    /// Checks the fields every vault requires.
    ///
    /// # Errors
    ///
    /// Returns [`PassTuiError::InvalidCredential`](crate::domain::PassTuiError::InvalidCredential)
    /// when the service or password is empty.
    pub fn validate(&self) -> crate::domain::Result<()> {
        if self.service.trim().is_empty() {
            return Err(crate::domain::PassTuiError::InvalidCredential(
                "service name cannot be empty".into(),
            ));
        }
        if self.password.is_empty() {
            return Err(crate::domain::PassTuiError::InvalidCredential(
                "password cannot be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Per-field update instruction.
///
/// `Keep` leaves the stored value untouched; `Set` replaces it, and
/// `Set(String::new())` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    #[default]
    Keep,
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// Returns the new value if this is a `Set`.
    #[must_use]
    pub const fn as_set(&self) -> Option<&T> {
        match self {
            Self::Keep => None,
            Self::Set(value) => Some(value),
        }
    }

    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

impl<T: PartialEq + Clone> FieldUpdate<T> {
    /// Applies the update to `target`, returning `true` if the value changed.
    pub fn apply_to(&self, target: &mut T) -> bool {
        match self {
            Self::Set(value) if value != target => {
                target.clone_from(value);
                true
            }
            _ => false,
        }
    }
}

/// Update instruction for an existing credential.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    pub username: FieldUpdate<String>,
    pub password: FieldUpdate<String>,
    pub category: FieldUpdate<String>,
    pub url: FieldUpdate<String>,
    pub notes: FieldUpdate<String>,
}

impl UpdateOptions {
    /// Returns `true` if every field is `Keep`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.username.is_keep()
            && self.password.is_keep()
            && self.category.is_keep()
            && self.url.is_keep()
            && self.notes.is_keep()
    }
}

/// Maps a stored category to its display label.
///
/// # Example
///
/// ```
/// use pass_tui::domain::category_label;
///
/// assert_eq!(category_label(""), "Uncategorized");
/// assert_eq!(category_label("dev"), "dev");
/// ```
#[must_use]
pub fn category_label(category: &str) -> &str {
    if category.is_empty() {
        UNCATEGORIZED
    } else {
        category
    }
}

/// Maps a display label back to the stored category value.
///
/// The [`UNCATEGORIZED`] label maps to the empty string, so a credential saved
/// from a form with "Uncategorized" selected lands in the synthetic bucket.
#[must_use]
pub fn category_from_label(label: &str) -> String {
    let label = label.trim();
    if label == UNCATEGORIZED {
        String::new()
    } else {
        label.to_string()
    }
}

/// Returns the credentials whose category label equals `label`.
///
/// `None` means "all credentials" and returns the input unchanged.
#[must_use]
pub fn filter_by_category(
    credentials: &[CredentialMetadata],
    label: Option<&str>,
) -> Vec<CredentialMetadata> {
    match label {
        None => credentials.to_vec(),
        Some(label) => credentials
            .iter()
            .filter(|c| c.category_label() == label)
            .cloned()
            .collect(),
    }
}

/// Formats the elapsed time between `at` and `now` as a compact relative string.
///
/// # Example
///
/// ```
/// use chrono::{Duration, Utc};
/// use pass_tui::domain::time_ago;
///
/// let now = Utc::now();
/// assert_eq!(time_ago(now - Duration::minutes(5), now), "5m ago");
/// assert_eq!(time_ago(now - Duration::days(2), now), "2d ago");
/// ```
#[must_use]
pub fn time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - at).num_seconds();

    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        let mins = diff / SECONDS_PER_MINUTE;
        format!("{mins}m ago")
    } else if diff < SECONDS_PER_DAY {
        let hours = diff / SECONDS_PER_HOUR;
        format!("{hours}h ago")
    } else {
        let days = diff / SECONDS_PER_DAY;
        format!("{days}d ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn labels_round_trip_through_uncategorized() {
        assert_eq!(category_label(""), UNCATEGORIZED);
        assert_eq!(category_from_label(UNCATEGORIZED), "");
        assert_eq!(category_from_label(" work "), "work");
    }

    #[test]
    fn filter_matches_on_label() {
        let creds = vec![
            CredentialMetadata::new("AWS", "root", ""),
            CredentialMetadata::new("GH", "octo", "dev"),
        ];
        let dev = filter_by_category(&creds, Some("dev"));
        assert_eq!(dev.len(), 1);
        assert_eq!(dev[0].service, "GH");

        let none = filter_by_category(&creds, Some(UNCATEGORIZED));
        assert_eq!(none[0].service, "AWS");

        assert_eq!(filter_by_category(&creds, None).len(), 2);
    }

    #[test]
    fn field_update_reports_changes() {
        let mut value = "old".to_string();
        assert!(!FieldUpdate::Keep.apply_to(&mut value));
        assert!(!FieldUpdate::Set("old".to_string()).apply_to(&mut value));
        assert!(FieldUpdate::Set(String::new()).apply_to(&mut value));
        assert!(value.is_empty());
    }

    #[test]
    fn new_credential_requires_service_and_password() {
        let mut new = NewCredential {
            service: "gh".into(),
            password: "pw".into(),
            ..NewCredential::default()
        };
        assert!(new.validate().is_ok());
        new.password.clear();
        assert!(new.validate().is_err());
        new.password = "pw".into();
        new.service = "  ".into();
        assert!(new.validate().is_err());
    }

    #[test]
    fn time_ago_buckets() {
        let now = Utc::now();
        assert_eq!(time_ago(now, now), "just now");
        assert_eq!(time_ago(now - Duration::hours(3), now), "3h ago");
        assert_eq!(CredentialMetadata::default().last_used(), "Never");
    }
}
