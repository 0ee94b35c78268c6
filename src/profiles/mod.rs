// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Local Profiles
//!
//! Every authenticated identity is mirrored by a local profile record. The
//! auth gate calls [`ProfileStore::get_or_create`] once per request, so the
//! first request from a new user creates their profile.
//!
//! Two backends:
//!
//! - [`RestProfileStore`] - the hosted record store, reached over HTTP
//! - [`InMemoryProfileStore`] - process-local map for development and tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Identity;

pub mod memory;
pub mod rest;

pub use memory::InMemoryProfileStore;
pub use rest::{RecordStoreClient, RestProfileStore};

/// Error type for record store operations.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Record store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Record store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Record store response was invalid: {0}")]
    InvalidResponse(String),

    #[error("Record store URL cannot be used as a base: {0}")]
    InvalidBaseUrl(String),
}

/// Profile record owned by this application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LocalProfile {
    /// Identity provider subject
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Set by the store on insert
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body sent to create a profile for a first-time user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProfile {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl NewProfile {
    /// Build the create body; blank optional fields become absent.
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            id: identity.id().to_string(),
            email: identity.email().to_string(),
            display_name: non_blank(identity.display_name()),
            avatar_url: non_blank(identity.avatar_url()),
        }
    }
}

/// Replacement values for the user-editable profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    pub fn new(display_name: Option<&str>, avatar_url: Option<&str>) -> Self {
        Self {
            display_name: display_name.and_then(non_blank),
            avatar_url: avatar_url.and_then(non_blank),
        }
    }
}

/// `None` when empty or whitespace-only, otherwise the value unchanged.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}

/// Storage for local profiles.
///
/// `get_or_create` must be idempotent per identity id: a lookup miss leads to
/// exactly one create, and a failed create is returned, never retried.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the profile for `identity`, creating it on first sight.
    async fn get_or_create(&self, identity: &Identity) -> Result<LocalProfile, RecordError>;

    /// Replace the editable fields of an existing profile.
    async fn update(&self, id: &str, update: &ProfileUpdate) -> Result<LocalProfile, RecordError>;

    /// Remove a profile.
    async fn delete(&self, id: &str) -> Result<(), RecordError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), RecordError>;
}
