// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(identity): Auth) -> impl IntoResponse {
//!     // identity is the caller's validated Identity
//! }
//! ```
//!
//! Behind [`require_auth`](super::middleware::require_auth) the gate has
//! already run and both extractors read its result from the request
//! extensions. Without the middleware the first extractor runs the gate itself
//! and stores the result, so profile sync still happens once per request.

use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::Utc;

use super::gate::authenticate_headers;
use super::{AuthError, Identity};
use crate::profiles::LocalProfile;
use crate::state::AppState;

/// Extractor for the authenticated caller's identity.
pub struct Auth(pub Identity);

/// Extractor for the caller's local profile, as resolved by the gate.
pub struct SyncedProfile(pub LocalProfile);

async fn resolve(parts: &mut Parts, state: &AppState) -> Result<(Identity, LocalProfile), AuthError> {
    if let (Some(identity), Some(profile)) = (
        parts.extensions.get::<Identity>(),
        parts.extensions.get::<LocalProfile>(),
    ) {
        return Ok((identity.clone(), profile.clone()));
    }

    let (identity, profile) =
        authenticate_headers(&parts.headers, &state.auth_config, &state.profiles, Utc::now()).await?;
    parts.extensions.insert(identity.clone());
    parts.extensions.insert(profile.clone());
    Ok((identity, profile))
}

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let (identity, _) = resolve(parts, state).await?;
        Ok(Auth(identity))
    }
}

impl FromRequestParts<AppState> for SyncedProfile {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let (_, profile) = resolve(parts, state).await?;
        Ok(SyncedProfile(profile))
    }
}
