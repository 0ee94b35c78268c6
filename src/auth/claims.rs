// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Claims validation against the configured audience and issuer domain.

use chrono::{DateTime, Utc};

use super::token::DecodedToken;
use super::AuthError;

/// Issuer the provider stamps on tokens for `domain`.
pub fn expected_issuer(domain: &str) -> String {
    format!("https://{domain}/")
}

/// Check audience, issuer and expiration, in that order.
///
/// The first failing check is reported and the rest are skipped. Expiration is
/// strict: a token whose `exp` equals `now` is already expired. No clock-skew
/// leeway is applied and `iat` is not checked.
pub fn validate(
    token: &DecodedToken,
    expected_audience: &str,
    expected_domain: &str,
    now: DateTime<Utc>,
) -> Result<(), AuthError> {
    let claims = &token.payload;

    if claims.audience != expected_audience {
        return Err(AuthError::InvalidAudience);
    }

    if claims.issuer != expected_issuer(expected_domain) {
        return Err(AuthError::InvalidIssuer);
    }

    if claims.expires_at <= now.timestamp() {
        return Err(AuthError::ExpiredToken);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::{parse, tests::{encode_token, sample_claims, sample_header}};
    use serde_json::json;

    const AUDIENCE: &str = "api://expected";
    const DOMAIN: &str = "tenant.example";

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn token_with(field: &str, value: serde_json::Value) -> DecodedToken {
        let mut claims = sample_claims();
        claims[field] = value;
        parse(&encode_token(&sample_header(), &claims)).unwrap()
    }

    #[test]
    fn accepts_matching_unexpired_token() {
        let token = token_with("exp", json!(1_700_003_600));
        assert_eq!(validate(&token, AUDIENCE, DOMAIN, at(1_700_000_000)), Ok(()));
    }

    #[test]
    fn audience_must_match_exactly() {
        for aud in ["api://other", "api://expected/", "API://EXPECTED", ""] {
            let token = token_with("aud", aud.into());
            assert_eq!(
                validate(&token, AUDIENCE, DOMAIN, at(1_700_000_000)),
                Err(AuthError::InvalidAudience),
                "{aud:?}"
            );
        }
    }

    #[test]
    fn issuer_is_built_from_domain() {
        assert_eq!(expected_issuer("tenant.example"), "https://tenant.example/");

        for iss in ["https://tenant.example", "http://tenant.example/", "https://evil.example/"] {
            let token = token_with("iss", iss.into());
            assert_eq!(
                validate(&token, AUDIENCE, DOMAIN, at(1_700_000_000)),
                Err(AuthError::InvalidIssuer),
                "{iss:?}"
            );
        }
    }

    #[test]
    fn expiry_equal_to_now_is_rejected() {
        let token = token_with("exp", json!(1_700_000_000));
        assert_eq!(
            validate(&token, AUDIENCE, DOMAIN, at(1_700_000_000)),
            Err(AuthError::ExpiredToken)
        );
        assert_eq!(validate(&token, AUDIENCE, DOMAIN, at(1_699_999_999)), Ok(()));
    }

    #[test]
    fn no_leeway_after_expiry() {
        let token = token_with("exp", json!(1_700_000_000));
        assert_eq!(
            validate(&token, AUDIENCE, DOMAIN, at(1_700_000_001)),
            Err(AuthError::ExpiredToken)
        );
    }

    #[test]
    fn audience_failure_wins_over_later_checks() {
        let mut claims = sample_claims();
        claims["aud"] = "api://other".into();
        claims["iss"] = "https://evil.example/".into();
        claims["exp"] = json!(0);
        let token = parse(&encode_token(&sample_header(), &claims)).unwrap();

        assert_eq!(
            validate(&token, AUDIENCE, DOMAIN, at(1_700_000_000)),
            Err(AuthError::InvalidAudience)
        );
    }

    #[test]
    fn issuer_failure_wins_over_expiry() {
        let mut claims = sample_claims();
        claims["iss"] = "https://evil.example/".into();
        claims["exp"] = json!(0);
        let token = parse(&encode_token(&sample_header(), &claims)).unwrap();

        assert_eq!(
            validate(&token, AUDIENCE, DOMAIN, at(1_700_000_000)),
            Err(AuthError::InvalidIssuer)
        );
    }

    #[test]
    fn future_issued_at_is_not_checked() {
        let token = token_with("iat", json!(1_800_000_000));
        assert_eq!(validate(&token, AUDIENCE, DOMAIN, at(1_700_000_000)), Ok(()));
    }
}
