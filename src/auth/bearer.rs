// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer credential extraction from an `Authorization` header value.

use super::AuthError;

const BEARER_PREFIX: &str = "Bearer ";

/// Pull the raw token out of a `Bearer <token>` header value.
///
/// The prefix is case-sensitive and ends at its single space. Whatever follows
/// is trimmed, so extra spaces between `Bearer` and the token are tolerated;
/// only a blank remainder is rejected.
pub fn extract(header_value: &str) -> Result<&str, AuthError> {
    let token = header_value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::InvalidToken)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::InvalidToken);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_token_after_prefix() {
        assert_eq!(extract("Bearer abc.def.ghi"), Ok("abc.def.ghi"));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(extract("Bearer abc.def.ghi  "), Ok("abc.def.ghi"));
        assert_eq!(extract("Bearer \tabc"), Ok("abc"));
    }

    #[test]
    fn extra_spaces_after_prefix_are_tolerated() {
        assert_eq!(extract("Bearer  x"), Ok("x"));
        assert_eq!(extract("Bearer    abc.def.ghi"), Ok("abc.def.ghi"));
    }

    #[test]
    fn rejects_missing_or_miscased_prefix() {
        for value in ["abc.def.ghi", "bearer abc", "BEARER abc", "Basic dXNlcjpwYXNz", "Bearerabc"] {
            assert_eq!(extract(value), Err(AuthError::InvalidToken), "{value:?}");
        }
    }

    #[test]
    fn rejects_empty_or_blank_token() {
        for value in ["", "Bearer", "Bearer ", "Bearer    ", "Bearer \t\n"] {
            assert_eq!(extract(value), Err(AuthError::InvalidToken), "{value:?}");
        }
    }
}
