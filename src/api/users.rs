// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    auth::{Auth, Identity, SyncedProfile},
    error::ApiError,
    profiles::{LocalProfile, ProfileUpdate},
    state::AppState,
};

/// Response for GET /v1/users/me
#[derive(Debug, Serialize, ToSchema)]
pub struct UserMeResponse {
    /// Identity provider subject
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: String,
}

impl From<Identity> for UserMeResponse {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.id().to_string(),
            email: identity.email().to_string(),
            display_name: identity.display_name().to_string(),
            avatar_url: identity.avatar_url().to_string(),
        }
    }
}

/// Request body for PATCH /v1/users/me. Blank values clear the field.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Get the current authenticated user's identity.
#[utoipa::path(
    get,
    path = "/v1/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User identity", body = UserMeResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn get_current_user(Auth(identity): Auth) -> Json<UserMeResponse> {
    Json(identity.into())
}

/// Get the caller's local profile, creating it on first use.
#[utoipa::path(
    post,
    path = "/v1/users/sync",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Local profile", body = LocalProfile),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 500, description = "Record store unavailable"),
    )
)]
pub async fn sync_current_user(SyncedProfile(profile): SyncedProfile) -> Json<LocalProfile> {
    Json(profile)
}

/// Replace the caller's display name and avatar.
#[utoipa::path(
    patch,
    path = "/v1/users/me",
    tag = "Users",
    security(("bearer" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = LocalProfile),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 404, description = "Profile not found"),
    )
)]
pub async fn update_current_user(
    Auth(identity): Auth,
    State(state): State<AppState>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<LocalProfile>, ApiError> {
    let update = ProfileUpdate::new(request.display_name.as_deref(), request.avatar_url.as_deref());
    let profile = state.profiles.update(identity.id(), &update).await?;
    Ok(Json(profile))
}

/// Delete the caller's local profile.
#[utoipa::path(
    delete,
    path = "/v1/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Profile deleted"),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 404, description = "Profile not found"),
    )
)]
pub async fn delete_current_user(
    Auth(identity): Auth,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state.profiles.delete(identity.id()).await?;
    tracing::info!(user_id = %identity.id(), "Deleted local profile");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::test_support::{auth_config, test_identity};

    #[test]
    fn user_me_response_from_identity() {
        let identity = test_identity("user_123", "Donor@Example.org", "Dana", "https://img/d.png");

        let response: UserMeResponse = identity.into();
        assert_eq!(response.user_id, "user_123");
        assert_eq!(response.email, "Donor@Example.org");
        assert_eq!(response.display_name, "Dana");
        assert_eq!(response.avatar_url, "https://img/d.png");
    }

    #[tokio::test]
    async fn update_current_user_replaces_fields() {
        let state = AppState::in_memory(auth_config());
        let identity = test_identity("user_123", "d@example.org", "Dana", "https://img/d.png");
        state.profiles.get_or_create(&identity).await.unwrap();

        let Json(profile) = update_current_user(
            Auth(identity),
            State(state.clone()),
            Json(UpdateProfileRequest {
                display_name: Some("Dana D.".into()),
                avatar_url: Some("".into()),
            }),
        )
        .await
        .expect("profile update succeeds");

        assert_eq!(profile.display_name.as_deref(), Some("Dana D."));
        assert_eq!(profile.avatar_url, None);
    }

    #[tokio::test]
    async fn update_without_profile_is_not_found() {
        let state = AppState::in_memory(auth_config());
        let identity = test_identity("ghost", "g@example.org", "", "");

        let error = update_current_user(
            Auth(identity),
            State(state),
            Json(UpdateProfileRequest::default()),
        )
        .await
        .unwrap_err();

        assert_eq!(error.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_current_user_removes_profile() {
        let state = AppState::in_memory(auth_config());
        let identity = test_identity("user_123", "d@example.org", "Dana", "");
        state.profiles.get_or_create(&identity).await.unwrap();

        let status = delete_current_user(Auth(identity), State(state.clone()))
            .await
            .expect("profile deletion succeeds");

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(matches!(
            state.profiles.delete("user_123").await,
            Err(crate::profiles::RecordError::NotFound(_))
        ));
    }
}
