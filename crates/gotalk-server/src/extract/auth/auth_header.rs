//! Bearer token extraction from the `Authorization` header.

use std::fmt;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind};

/// Case-sensitive scheme prefix, including the single separating space.
const BEARER_PREFIX: &str = "Bearer ";

/// Raw bearer token taken from `Authorization: Bearer <token>`.
///
/// Only the header shape is checked here. The token itself is verified by
/// [`AuthState`].
///
/// [`AuthState`]: crate::extract::AuthState
#[must_use]
#[derive(Clone, PartialEq, Eq)]
pub struct AuthHeader(String);

impl AuthHeader {
    /// Parses an `Authorization` header value.
    ///
    /// The value must be exactly `Bearer ` followed by a non-empty token.
    pub fn parse(value: &str) -> Option<Self> {
        value
            .strip_prefix(BEARER_PREFIX)
            .filter(|token| !token.is_empty())
            .map(|token| Self(token.to_owned()))
    }

    /// Returns the bearer token.
    #[inline]
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthHeader").field(&"[REDACTED]").finish()
    }
}

impl<S> FromRequestParts<S> for AuthHeader
where
    S: Sync + Send,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(AUTHORIZATION) else {
            tracing::debug!(
                target: TRACING_TARGET_AUTHENTICATION,
                "missing authorization header"
            );
            return Err(ErrorKind::MissingAuthToken
                .with_message("Authentication required")
                .with_context("Missing Authorization header with Bearer token")
                .with_resource("authentication"));
        };

        let auth_header = value.to_str().ok().and_then(Self::parse).ok_or_else(|| {
            tracing::debug!(
                target: TRACING_TARGET_AUTHENTICATION,
                "malformed authorization header"
            );
            ErrorKind::MalformedAuthToken
                .with_message("Invalid token format")
                .with_context("Authorization header must be 'Bearer <token>'")
                .with_resource("authentication")
        })?;

        Ok(auth_header)
    }
}
