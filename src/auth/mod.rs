// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer-token authentication for the donation tracker API.
//!
//! ## Auth Flow
//!
//! 1. Frontend authenticates the user with the identity provider
//! 2. Frontend sends `Authorization: Bearer <token>`
//! 3. Server:
//!    - Splits the token and decodes header and payload (`token`)
//!    - Checks audience, issuer and expiry, in that order (`claims`)
//!    - Maps `sub`, `email`, `name`, `picture` to an [`Identity`]
//!    - Gets or creates the matching local profile (`crate::profiles`)
//!
//! ## Security
//!
//! - Every `/v1` endpoint goes through the gate
//! - No clock-skew leeway; a token expiring now is expired
//! - The token signature is NOT verified against the provider's key set.
//!   `AuthError::InvalidSignature` is reserved for when it is.

pub mod base64url;
pub mod bearer;
pub mod claims;
pub mod error;
pub mod extractor;
pub mod gate;
pub mod identity;
pub mod middleware;
pub mod token;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::AuthError;
pub use extractor::{Auth, SyncedProfile};
pub use gate::{authenticate, authenticate_at, AuthenticatedRequest};
pub use identity::Identity;
pub use token::DecodedToken;

#[cfg(test)]
pub(crate) use test_support::test_identity;
