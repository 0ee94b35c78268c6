// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Why a request was not authenticated.
///
/// Exactly one variant is produced per authentication attempt: the gate stops
/// at the first failing step and never aggregates errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization` header present
    #[error("Authorization header is required")]
    MissingAuthHeader,
    /// Bearer value or token structure is unusable
    #[error("Invalid bearer token")]
    InvalidToken,
    /// Header or payload segment could not be decoded into its record
    #[error("Malformed token payload: {0}")]
    MalformedPayload(String),
    /// `exp` is not strictly in the future
    #[error("Token has expired")]
    ExpiredToken,
    /// `aud` does not match the configured audience
    #[error("Token audience is invalid")]
    InvalidAudience,
    /// `iss` does not match the configured issuer domain
    #[error("Token issuer is invalid")]
    InvalidIssuer,
    /// Reserved: no signature verification is performed yet.
    #[error("Token signature is invalid")]
    InvalidSignature,
    /// Profile sync with the record store failed
    #[error("Profile sync failed: {0}")]
    UpstreamError(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidToken => "invalid_token",
            AuthError::MalformedPayload(_) => "malformed_payload",
            AuthError::ExpiredToken => "token_expired",
            AuthError::InvalidAudience => "invalid_audience",
            AuthError::InvalidIssuer => "invalid_issuer",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::UpstreamError(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader
            | AuthError::InvalidToken
            | AuthError::MalformedPayload(_)
            | AuthError::ExpiredToken
            | AuthError::InvalidAudience
            | AuthError::InvalidIssuer
            | AuthError::InvalidSignature => StatusCode::UNAUTHORIZED,
            AuthError::UpstreamError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the caller.
    ///
    /// Upstream failures collapse to a generic message; their detail only
    /// reaches the logs.
    pub fn public_message(&self) -> String {
        match self {
            AuthError::UpstreamError(_) => "Internal server error".to_string(),
            AuthError::MalformedPayload(_) => "Token is malformed".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.public_message(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
