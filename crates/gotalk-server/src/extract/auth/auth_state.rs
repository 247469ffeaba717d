//! Authenticated account extraction.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use derive_more::Deref;
use uuid::Uuid;

use super::AuthHeader;
use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::Error;
use crate::service::SessionTokens;

/// Identifier of the account whose bearer token was verified.
///
/// The first extraction in a request verifies the token and caches the
/// result in the request extensions. Later extractions, including those in
/// handlers behind [`require_authentication`], reuse the cached value.
///
/// The account store is never consulted: a token for a deleted account still
/// yields its identifier until it expires.
///
/// [`require_authentication`]: crate::middleware::require_authentication
#[must_use]
#[derive(Debug, Clone, Copy, Deref, PartialEq, Eq)]
pub struct AuthState(pub Uuid);

impl AuthState {
    /// Returns the authenticated account identifier.
    #[inline]
    pub const fn account_id(&self) -> Uuid {
        self.0
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync + Send,
    SessionTokens: FromRef<S>,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(*auth_state);
        }

        let auth_header = AuthHeader::from_request_parts(parts, state).await?;
        let session_tokens = SessionTokens::from_ref(state);
        let account_id = session_tokens.verify(auth_header.token())?;

        tracing::debug!(
            target: TRACING_TARGET_AUTHENTICATION,
            account_id = %account_id,
            "request authenticated"
        );

        let auth_state = Self(account_id);
        parts.extensions.insert(auth_state);
        Ok(auth_state)
    }
}
