// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory profile store.
//!
//! Used when no record store URL is configured, and by tests. Profiles are
//! lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{LocalProfile, NewProfile, ProfileStore, ProfileUpdate, RecordError};
use crate::auth::Identity;

#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<String, LocalProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a profile without creating it.
    pub async fn get(&self, id: &str) -> Option<LocalProfile> {
        self.profiles.read().await.get(id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.profiles.read().await.len()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_or_create(&self, identity: &Identity) -> Result<LocalProfile, RecordError> {
        // Lookup and insert share one write guard, so concurrent first requests
        // for the same id create a single profile.
        let mut profiles = self.profiles.write().await;
        if let Some(profile) = profiles.get(identity.id()) {
            return Ok(profile.clone());
        }

        let new = NewProfile::from_identity(identity);
        let profile = LocalProfile {
            id: new.id,
            email: new.email,
            display_name: new.display_name,
            avatar_url: new.avatar_url,
            created_at: Some(Utc::now()),
        };
        profiles.insert(profile.id.clone(), profile.clone());
        tracing::info!(user_id = %profile.id, "Created local profile");
        Ok(profile)
    }

    async fn update(&self, id: &str, update: &ProfileUpdate) -> Result<LocalProfile, RecordError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(id)
            .ok_or_else(|| RecordError::NotFound(format!("Profile {id}")))?;
        profile.display_name = update.display_name.clone();
        profile.avatar_url = update.avatar_url.clone();
        Ok(profile.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), RecordError> {
        self.profiles
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RecordError::NotFound(format!("Profile {id}")))
    }

    async fn ping(&self) -> Result<(), RecordError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::test_identity;

    #[tokio::test]
    async fn creates_profile_on_first_sight() {
        let store = InMemoryProfileStore::new();
        let identity = test_identity("user_1", "a@example.org", "Ada", "");

        let profile = store.get_or_create(&identity).await.unwrap();

        assert_eq!(profile.id, "user_1");
        assert_eq!(profile.display_name.as_deref(), Some("Ada"));
        assert_eq!(profile.avatar_url, None);
        assert!(profile.created_at.is_some());
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let store = InMemoryProfileStore::new();
        let identity = test_identity("user_1", "a@example.org", "Ada", "");

        let first = store.get_or_create(&identity).await.unwrap();
        let renamed = test_identity("user_1", "a@example.org", "Someone Else", "");
        let second = store.get_or_create(&renamed).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn concurrent_first_requests_create_one_profile() {
        let store = Arc::new(InMemoryProfileStore::new());
        let identity = test_identity("user_1", "a@example.org", "Ada", "");

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                let identity = identity.clone();
                tokio::spawn(async move { store.get_or_create(&identity).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn update_replaces_editable_fields() {
        let store = InMemoryProfileStore::new();
        let identity = test_identity("user_1", "a@example.org", "Ada", "https://img/a.png");
        store.get_or_create(&identity).await.unwrap();

        let updated = store
            .update("user_1", &ProfileUpdate::new(Some("Ada L."), None))
            .await
            .unwrap();

        assert_eq!(updated.display_name.as_deref(), Some("Ada L."));
        assert_eq!(updated.avatar_url, None);
        assert_eq!(store.get("user_1").await, Some(updated));
    }

    #[tokio::test]
    async fn update_and_delete_missing_profile_fail() {
        let store = InMemoryProfileStore::new();

        assert!(matches!(
            store.update("nobody", &ProfileUpdate::default()).await,
            Err(RecordError::NotFound(_))
        ));
        assert!(matches!(store.delete("nobody").await, Err(RecordError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_removes_profile() {
        let store = InMemoryProfileStore::new();
        let identity = test_identity("user_1", "a@example.org", "Ada", "");
        store.get_or_create(&identity).await.unwrap();

        store.delete("user_1").await.unwrap();

        assert_eq!(store.get("user_1").await, None);
    }
}
