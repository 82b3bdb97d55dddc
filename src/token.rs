//! Bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with the process-wide secret from
//! [`crate::config::Config`]. Verification is a pure function of
//! (token, secret, current time): no network or storage access. Expiry is
//! enforced by `jsonwebtoken`'s `exp` validation.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Claims carried by an issued token.
///
/// Attached to the request extensions by the auth middleware on successful
/// verification, so downstream handlers know who made the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated operator's username
    pub sub: String,

    /// Issued-at, seconds since the Unix epoch
    pub iat: u64,

    /// Expiry, seconds since the Unix epoch
    pub exp: u64,

    /// Unique token id
    pub jti: String,
}

/// Issue a signed token for `sub`, valid for `ttl_secs` from now.
pub fn issue(sub: &str, secret: &str, ttl_secs: u64) -> Result<String, jsonwebtoken::errors::Error> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let claims = Claims {
        sub: sub.to_string(),
        iat: now,
        exp: now + ttl_secs,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a token's signature and expiry, returning its claims.
///
/// Fails on a bad signature, an expired `exp`, or a malformed payload. The
/// caller is expected to collapse all failure modes into one generic
/// unauthorized response; the distinct error kinds never reach clients.
pub fn verify(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::ErrorKind;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn issued_token_verifies_and_round_trips_subject() {
        let token = issue("admin", SECRET, 3600).unwrap();
        let claims = verify(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.exp, claims.iat + 3600);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let token = issue("admin", SECRET, 3600).unwrap();
        assert!(verify(&token, "some-other-secret").is_err());
    }

    #[test]
    fn tampered_token_fails_verification() {
        let token = issue("admin", SECRET, 3600).unwrap();
        // Flip a character in the signature segment.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert!(verify(&tampered, SECRET).is_err());
    }

    #[test]
    fn expired_token_fails_verification() {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        // Expired two hours ago, well past the default validation leeway.
        let claims = Claims {
            sub: "admin".to_string(),
            iat: now - 10_000,
            exp: now - 7_200,
            jti: "expired".to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let err = verify(&token, SECRET).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ExpiredSignature));
    }

    #[test]
    fn garbage_token_fails_verification() {
        assert!(verify("not-a-jwt", SECRET).is_err());
    }
}
