// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::config::AuthConfig;
use crate::profiles::ProfileStore;

/// Shared, read-only per-process state. Nothing here is mutated by requests
/// except through the profile store itself.
#[derive(Clone)]
pub struct AppState {
    pub auth_config: Arc<AuthConfig>,
    pub profiles: Arc<dyn ProfileStore>,
}

impl AppState {
    pub fn new(auth_config: AuthConfig, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            auth_config: Arc::new(auth_config),
            profiles,
        }
    }

    /// State backed by an in-memory profile store.
    #[cfg(test)]
    pub(crate) fn in_memory(auth_config: AuthConfig) -> Self {
        Self::new(auth_config, Arc::new(crate::profiles::InMemoryProfileStore::new()))
    }
}
