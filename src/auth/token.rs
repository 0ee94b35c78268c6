// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Structural decoding of compact `header.payload.signature` tokens.
//!
//! Both records are strictly typed: every field below is required, and a
//! missing or mistyped field fails the whole decode. There is no partially
//! populated token.

use serde::{de::DeserializeOwned, Deserialize};

use super::base64url::decode_url_safe;
use super::AuthError;

/// Token header.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenHeader {
    /// Signing algorithm (`alg`)
    #[serde(rename = "alg")]
    pub algorithm: String,
    /// Token type (`typ`)
    #[serde(rename = "typ")]
    pub token_type: String,
    /// Signing key identifier (`kid`)
    #[serde(rename = "kid")]
    pub key_id: String,
}

/// Claims carried in the token payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Issuer URL (`iss`)
    #[serde(rename = "iss")]
    pub issuer: String,
    /// Subject, the provider's user id (`sub`)
    #[serde(rename = "sub")]
    pub subject: String,
    /// Intended audience (`aud`), a single string
    #[serde(rename = "aud")]
    pub audience: String,
    /// Expiration, seconds since epoch (`exp`)
    #[serde(rename = "exp")]
    pub expires_at: i64,
    /// Issued at, seconds since epoch (`iat`)
    #[serde(rename = "iat")]
    pub issued_at: i64,
    pub email: String,
    pub name: String,
    pub picture: String,
}

/// A token split into its parts, with header and payload decoded.
///
/// Built once per request and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken {
    pub header: TokenHeader,
    pub payload: TokenClaims,
    /// Signature segment, kept verbatim and not verified.
    pub signature: String,
    /// The token exactly as presented.
    pub raw: String,
}

/// Split and decode a compact token.
///
/// A segment count other than three is `InvalidToken`; anything wrong inside
/// the header or payload segment is `MalformedPayload`.
pub fn parse(raw: &str) -> Result<DecodedToken, AuthError> {
    let segments: Vec<&str> = raw.split('.').collect();
    let [header, payload, signature] = segments.as_slice() else {
        return Err(AuthError::InvalidToken);
    };

    Ok(DecodedToken {
        header: decode_segment(header, "header")?,
        payload: decode_segment(payload, "payload")?,
        signature: (*signature).to_string(),
        raw: raw.to_string(),
    })
}

fn decode_segment<T: DeserializeOwned>(segment: &str, part: &str) -> Result<T, AuthError> {
    let json = decode_url_safe(segment)
        .map_err(|e| AuthError::MalformedPayload(format!("{part}: {e}")))?;
    serde_json::from_str(&json).map_err(|e| AuthError::MalformedPayload(format!("{part}: {e}")))
}
