//! Storage record models for the vault file.
//!
//! This module defines the raw record types persisted by [`JsonVault`](crate::storage::JsonVault).
//! They are separate from the domain types so the on-disk format can carry
//! storage-only detail (per-location usage records, the password itself)
//! while the rest of the application works with
//! [`CredentialMetadata`](crate::domain::CredentialMetadata).

use crate::domain::{Credential, CredentialMetadata, NewCredential};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A stored credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub service: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub modified_count: u32,
    /// Usage records keyed by access location.
    #[serde(default)]
    pub usage: BTreeMap<String, UsageRecord>,
}

/// Access statistics for one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Working directory the credential was accessed from.
    pub location: String,
    /// Time of the most recent access from this location.
    pub timestamp: DateTime<Utc>,
    /// Number of accesses from this location.
    pub count: u32,
    /// Name of the enclosing git repository, if the location is inside one.
    #[serde(default)]
    pub git_repo: Option<String>,
    /// Per-field access counts (e.g. `"password"`).
    #[serde(default)]
    pub field_access: BTreeMap<String, u32>,
}

impl CredentialRecord {
    /// Creates a record from user input with both timestamps set to `now`.
    #[must_use]
    pub fn from_new(new: &NewCredential, now: DateTime<Utc>) -> Self {
        Self {
            service: new.service.trim().to_string(),
            username: new.username.clone(),
            password: new.password.clone(),
            category: new.category.clone(),
            url: new.url.clone(),
            notes: new.notes.clone(),
            created_at: now,
            updated_at: now,
            modified_count: 0,
            usage: BTreeMap::new(),
        }
    }

    /// Projects the record to metadata, aggregating usage across locations.
    ///
    /// `usage_count` is the sum of all location counts and `last_accessed`
    /// the most recent location timestamp.
    #[must_use]
    pub fn to_metadata(&self) -> CredentialMetadata {
        let usage_count = self.usage.values().map(|u| u.count).sum();
        let last_accessed = self.usage.values().map(|u| u.timestamp).max();
        let locations = self.usage.keys().cloned().collect();

        CredentialMetadata {
            service: self.service.clone(),
            username: self.username.clone(),
            category: self.category.clone(),
            url: self.url.clone(),
            notes: self.notes.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            modified_count: self.modified_count,
            usage_count,
            last_accessed,
            locations,
        }
    }

    #[must_use]
    pub fn to_credential(&self) -> Credential {
        Credential {
            metadata: self.to_metadata(),
            password: self.password.clone(),
        }
    }

    /// Records one access of `field` from `location`.
    pub fn record_access(
        &mut self,
        location: &str,
        git_repo: Option<String>,
        field: &str,
        now: DateTime<Utc>,
    ) {
        let entry = self
            .usage
            .entry(location.to_string())
            .or_insert_with(|| UsageRecord {
                location: location.to_string(),
                timestamp: now,
                count: 0,
                git_repo: None,
                field_access: BTreeMap::new(),
            });

        entry.timestamp = now;
        entry.count = entry.count.saturating_add(1);
        if git_repo.is_some() {
            entry.git_repo = git_repo;
        }
        let field_count = entry.field_access.entry(field.to_string()).or_insert(0);
        *field_count = field_count.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn metadata_aggregates_usage() {
        let now = Utc::now();
        let mut record = CredentialRecord::from_new(
            &NewCredential {
                service: " gh ".into(),
                password: "pw".into(),
                ..NewCredential::default()
            },
            now,
        );
        assert_eq!(record.service, "gh");

        record.record_access("/work/a", Some("a".into()), "password", now - Duration::hours(1));
        record.record_access("/work/a", None, "password", now - Duration::minutes(30));
        record.record_access("/work/b", None, "username", now);

        let meta = record.to_metadata();
        assert_eq!(meta.usage_count, 3);
        assert_eq!(meta.last_accessed, Some(now));
        assert_eq!(meta.locations, vec!["/work/a".to_string(), "/work/b".to_string()]);
        assert_eq!(record.usage["/work/a"].git_repo.as_deref(), Some("a"));
        assert_eq!(record.usage["/work/a"].field_access["password"], 2);
    }
}
