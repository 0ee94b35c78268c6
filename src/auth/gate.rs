// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The auth gate: header → bearer → token → claims → identity → profile sync.
//!
//! Each step either hands its output to the next or ends the attempt with a
//! single [`AuthError`]. Nothing after a failing step runs, and the caller only
//! ever sees a fully authenticated request or a rejection.

use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderMap, Request};
use chrono::{DateTime, Utc};

use super::{bearer, claims, token, AuthError, Identity};
use crate::config::AuthConfig;
use crate::error::ApiError;
use crate::profiles::{LocalProfile, ProfileStore};

/// A request that passed the gate, with the identity it was issued for.
#[derive(Debug)]
pub struct AuthenticatedRequest<B> {
    pub request: Request<B>,
    pub identity: Identity,
    /// Local profile resolved during sync.
    pub profile: LocalProfile,
}

/// Authenticate `request` against the current time.
pub async fn authenticate<B>(
    request: Request<B>,
    config: &AuthConfig,
    profiles: &Arc<dyn ProfileStore>,
) -> Result<AuthenticatedRequest<B>, ApiError> {
    authenticate_at(request, config, profiles, Utc::now()).await
}

/// Authenticate `request` as of `now`.
pub async fn authenticate_at<B>(
    request: Request<B>,
    config: &AuthConfig,
    profiles: &Arc<dyn ProfileStore>,
    now: DateTime<Utc>,
) -> Result<AuthenticatedRequest<B>, ApiError> {
    let (identity, profile) = authenticate_headers(request.headers(), config, profiles, now).await?;
    Ok(AuthenticatedRequest {
        request,
        identity,
        profile,
    })
}

/// Run the whole gate over a header map.
pub async fn authenticate_headers(
    headers: &HeaderMap,
    config: &AuthConfig,
    profiles: &Arc<dyn ProfileStore>,
    now: DateTime<Utc>,
) -> Result<(Identity, LocalProfile), AuthError> {
    let identity = verify_headers(headers, config, now).inspect_err(log_rejection)?;
    let profile = sync_profile(profiles, &identity).await?;
    Ok((identity, profile))
}

/// Every step up to identity extraction. Pure: no I/O.
pub fn verify_headers(
    headers: &HeaderMap,
    config: &AuthConfig,
    now: DateTime<Utc>,
) -> Result<Identity, AuthError> {
    let header_value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    let raw = bearer::extract(header_value)?;
    let decoded = token::parse(raw)?;
    claims::validate(&decoded, &config.audience, &config.domain, now)?;

    Ok(Identity::from_token(&decoded))
}

/// Get or create the caller's local profile, exactly once.
///
/// The store call runs on its own task and is awaited from there. If the
/// request is cancelled mid-call the task still finishes, so a create is
/// either fully applied or never sent.
async fn sync_profile(
    profiles: &Arc<dyn ProfileStore>,
    identity: &Identity,
) -> Result<LocalProfile, AuthError> {
    let store = Arc::clone(profiles);
    let owned = identity.clone();
    let outcome = tokio::spawn(async move { store.get_or_create(&owned).await }).await;

    match outcome {
        Ok(Ok(profile)) => Ok(profile),
        Ok(Err(e)) => {
            tracing::error!(user_id = %identity.id(), error = %e, "Profile sync failed");
            Err(AuthError::UpstreamError(e.to_string()))
        }
        Err(e) => {
            tracing::error!(user_id = %identity.id(), error = %e, "Profile sync task failed");
            Err(AuthError::UpstreamError(e.to_string()))
        }
    }
}

fn log_rejection(error: &AuthError) {
    match error {
        AuthError::MissingAuthHeader => {
            tracing::debug!(error_code = error.error_code(), "No bearer credential")
        }
        _ => tracing::warn!(error_code = error.error_code(), "Rejected bearer token"),
    }
}
