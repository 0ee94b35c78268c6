// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Canonical user identity derived from a validated token.

use serde::Serialize;
use utoipa::ToSchema;

use super::token::DecodedToken;

/// The caller's identity, as asserted by the identity provider.
///
/// Only the auth gate builds this, and only after claims validation has
/// passed. Fields are copied verbatim from the token; no normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Identity {
    /// Provider subject (`sub`), the canonical user id
    id: String,
    email: String,
    display_name: String,
    avatar_url: String,
}

impl Identity {
    /// Map validated claims to an identity.
    pub(crate) fn from_token(token: &DecodedToken) -> Self {
        let claims = &token.payload;
        Self {
            id: claims.subject.clone(),
            email: claims.email.clone(),
            display_name: claims.name.clone(),
            avatar_url: claims.picture.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }
}
