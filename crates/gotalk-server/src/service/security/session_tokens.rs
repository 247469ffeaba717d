//! Issuing and verifying signed session tokens.
//!
//! Tokens are compact HS256 JWS strings carrying the account identifier in
//! `sub` together with `iat` and `exp` as NumericDate seconds. Any token of
//! that shape signed with the same secret verifies, whoever produced it.

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SessionKeys;
use crate::TRACING_TARGET_AUTHENTICATION;

/// Lifetime of a freshly issued session token.
pub const SESSION_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(24);

/// Session token failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The token is malformed, expired, forged or uses another algorithm.
    ///
    /// The underlying cause is only logged, never exposed.
    #[error("invalid or expired token")]
    InvalidOrExpiredToken,
    /// The token could not be produced.
    #[error("token signing failed")]
    SigningFailed,
}

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Account the token was issued to.
    #[serde(rename = "sub")]
    pub account_id: Uuid,
    /// Issued at, absent in tokens minted by producers that omit it.
    #[serde(
        rename = "iat",
        default,
        skip_serializing_if = "Option::is_none",
        with = "jiff::fmt::serde::timestamp::second::optional"
    )]
    pub issued_at: Option<Timestamp>,
    /// Expiration time.
    #[serde(rename = "exp", with = "jiff::fmt::serde::timestamp::second::required")]
    pub expires_at: Timestamp,
}

/// A freshly signed token and its validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
}

/// Token issuer and verifier bound to a single [`SessionKeys`].
#[derive(Debug, Clone)]
pub struct SessionTokens {
    keys: SessionKeys,
    validation: Validation,
}

impl SessionTokens {
    /// Creates a new issuer/verifier over `keys`.
    pub fn new(keys: SessionKeys) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self { keys, validation }
    }

    /// Issues a token for `account_id`, valid for [`SESSION_TOKEN_TTL`].
    pub fn issue(&self, account_id: Uuid) -> Result<IssuedToken, TokenError> {
        self.issue_at(account_id, Timestamp::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(&self, account_id: Uuid, now: Timestamp) -> Result<IssuedToken, TokenError> {
        let (issued_at, expires_at) = validity_window(now).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %e,
                "session token validity window out of range"
            );
            TokenError::SigningFailed
        })?;

        let claims = AuthClaims {
            account_id,
            issued_at: Some(issued_at),
            expires_at,
        };

        let header = Header::new(Algorithm::HS256);
        let token = encode(&header, &claims, self.keys.encoding_key()).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %e,
                account_id = %account_id,
                "failed to encode session token"
            );
            TokenError::SigningFailed
        })?;

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            account_id = %account_id,
            expires_at = %expires_at,
            "session token issued"
        );

        Ok(IssuedToken {
            token,
            issued_at,
            expires_at,
        })
    }

    /// Verifies `token` and returns the account identifier it was issued to.
    ///
    /// Only HS256 tokens are accepted. Expiry is checked without leeway.
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let token_data = decode::<AuthClaims>(token, self.keys.decoding_key(), &self.validation)
            .map_err(|e| {
                tracing::debug!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    cause = ?e.kind(),
                    "session token rejected"
                );
                TokenError::InvalidOrExpiredToken
            })?;

        Ok(token_data.claims.account_id)
    }
}

/// Returns `(iat, exp)` for a token issued at `now`.
///
/// NumericDate has whole-second precision, so `now` is truncated first.
fn validity_window(now: Timestamp) -> Result<(Timestamp, Timestamp), jiff::Error> {
    let issued_at = Timestamp::from_second(now.as_second())?;
    let expires_at = issued_at.checked_add(SESSION_TOKEN_TTL)?;
    Ok((issued_at, expires_at))
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::EncodingKey;
    use serde_json::json;

    use super::*;

    const TEST_SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn session_tokens(secret: &[u8]) -> anyhow::Result<SessionTokens> {
        Ok(SessionTokens::new(SessionKeys::new_from_secret(secret)?))
    }

    fn sign(header: &Header, claims: &serde_json::Value) -> anyhow::Result<String> {
        Ok(encode(header, claims, &EncodingKey::from_secret(TEST_SECRET))?)
    }

    #[test]
    fn issue_and_verify() -> anyhow::Result<()> {
        let tokens = session_tokens(TEST_SECRET)?;
        let account_id = Uuid::new_v4();

        let issued = tokens.issue(account_id)?;
        assert_eq!(issued.token.split('.').count(), 3);
        assert_eq!(
            issued.issued_at.duration_until(issued.expires_at),
            SESSION_TOKEN_TTL
        );
        assert_eq!(issued.issued_at.subsec_nanosecond(), 0);

        assert_eq!(tokens.verify(&issued.token)?, account_id);
        assert_eq!(tokens.verify(&issued.token)?, account_id);
        Ok(())
    }

    #[test]
    fn reject_expired_token() -> anyhow::Result<()> {
        let tokens = session_tokens(TEST_SECRET)?;
        let issued_at = Timestamp::now() - SignedDuration::from_hours(25);
        let issued = tokens.issue_at(Uuid::new_v4(), issued_at)?;

        assert_eq!(
            tokens.verify(&issued.token),
            Err(TokenError::InvalidOrExpiredToken)
        );
        Ok(())
    }

    #[test]
    fn reject_tampered_signature() -> anyhow::Result<()> {
        let tokens = session_tokens(TEST_SECRET)?;
        let issued = tokens.issue(Uuid::new_v4())?;

        let (unsigned, signature) = issued
            .token
            .rsplit_once('.')
            .ok_or_else(|| anyhow::anyhow!("token has no signature"))?;
        let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
        let tampered = format!("{unsigned}.{flipped}{}", &signature[1..]);

        assert_eq!(
            tokens.verify(&tampered),
            Err(TokenError::InvalidOrExpiredToken)
        );
        Ok(())
    }

    #[test]
    fn reject_token_signed_with_another_key() -> anyhow::Result<()> {
        let issuer = session_tokens(b"ffffffffffffffffffffffffffffffff")?;
        let verifier = session_tokens(TEST_SECRET)?;
        let issued = issuer.issue(Uuid::new_v4())?;

        assert_eq!(
            verifier.verify(&issued.token),
            Err(TokenError::InvalidOrExpiredToken)
        );
        Ok(())
    }

    #[test]
    fn reject_unsigned_token() -> anyhow::Result<()> {
        let tokens = session_tokens(TEST_SECRET)?;
        let issued = tokens.issue(Uuid::new_v4())?;
        let claims = issued
            .token
            .split('.')
            .nth(1)
            .ok_or_else(|| anyhow::anyhow!("token has no claims"))?;

        // {"alg":"none","typ":"JWT"}
        let unsigned = format!("eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.{claims}.");
        assert_eq!(
            tokens.verify(&unsigned),
            Err(TokenError::InvalidOrExpiredToken)
        );
        Ok(())
    }

    #[test]
    fn reject_algorithm_substitution() -> anyhow::Result<()> {
        let tokens = session_tokens(TEST_SECRET)?;
        let exp = Timestamp::now().as_second() + 3600;
        let token = sign(
            &Header::new(Algorithm::HS512),
            &json!({ "sub": Uuid::new_v4(), "exp": exp }),
        )?;

        assert_eq!(tokens.verify(&token), Err(TokenError::InvalidOrExpiredToken));
        Ok(())
    }

    #[test]
    fn accept_foreign_token_without_iat() -> anyhow::Result<()> {
        let tokens = session_tokens(TEST_SECRET)?;
        let account_id = Uuid::new_v4();
        let exp = Timestamp::now().as_second() + 3600;
        let token = sign(
            &Header::new(Algorithm::HS256),
            &json!({ "sub": account_id, "exp": exp }),
        )?;

        assert_eq!(tokens.verify(&token)?, account_id);
        Ok(())
    }

    #[test]
    fn accept_foreign_token_with_audience() -> anyhow::Result<()> {
        let tokens = session_tokens(TEST_SECRET)?;
        let account_id = Uuid::new_v4();
        let exp = Timestamp::now().as_second() + 3600;
        let token = sign(
            &Header::new(Algorithm::HS256),
            &json!({ "sub": account_id, "exp": exp, "aud": "gotalk" }),
        )?;

        assert_eq!(tokens.verify(&token)?, account_id);
        Ok(())
    }

    #[test]
    fn reject_missing_or_invalid_claims() -> anyhow::Result<()> {
        let tokens = session_tokens(TEST_SECRET)?;
        let exp = Timestamp::now().as_second() + 3600;

        let no_exp = sign(&Header::new(Algorithm::HS256), &json!({ "sub": Uuid::new_v4() }))?;
        let no_sub = sign(&Header::new(Algorithm::HS256), &json!({ "exp": exp }))?;
        let bad_sub = sign(
            &Header::new(Algorithm::HS256),
            &json!({ "sub": "alice", "exp": exp }),
        )?;

        for token in [no_exp, no_sub, bad_sub] {
            assert_eq!(tokens.verify(&token), Err(TokenError::InvalidOrExpiredToken));
        }
        Ok(())
    }

    #[test]
    fn reject_garbage() -> anyhow::Result<()> {
        let tokens = session_tokens(TEST_SECRET)?;
        for token in ["", "not-a-token", "a.b.c", "a.b"] {
            assert_eq!(tokens.verify(token), Err(TokenError::InvalidOrExpiredToken));
        }
        Ok(())
    }
}
