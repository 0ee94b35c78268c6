// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token and identity fixtures shared by unit tests.

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};

use super::{token::parse, Identity};
use crate::config::AuthConfig;

pub(crate) const AUDIENCE: &str = "api://expected";
pub(crate) const DOMAIN: &str = "tenant.example";

pub(crate) fn auth_config() -> AuthConfig {
    AuthConfig::new(AUDIENCE, DOMAIN)
}

pub(crate) fn claims(subject: &str, expires_at: i64) -> Value {
    json!({
        "iss": format!("https://{DOMAIN}/"),
        "sub": subject,
        "aud": AUDIENCE,
        "exp": expires_at,
        "iat": expires_at - 3600,
        "email": format!("{subject}@example.org"),
        "name": "Test Donor",
        "picture": "https://cdn.example/avatar.png",
    })
}

/// Sign `claims` the way a provider would. The signature is never checked.
pub(crate) fn sign(claims: &Value) -> String {
    let header = Header {
        kid: Some("test-key".to_string()),
        ..Header::new(Algorithm::HS256)
    };
    encode(&header, claims, &EncodingKey::from_secret(b"test-secret")).unwrap()
}

/// A token that passes validation at `now` for an hour.
pub(crate) fn valid_token(subject: &str, now: DateTime<Utc>) -> String {
    sign(&claims(subject, now.timestamp() + 3600))
}

pub(crate) fn test_identity(id: &str, email: &str, name: &str, picture: &str) -> Identity {
    let mut claims = claims(id, 4_000_000_000);
    claims["email"] = email.into();
    claims["name"] = name.into();
    claims["picture"] = picture.into();
    Identity::from_token(&parse(&sign(&claims)).unwrap())
}
