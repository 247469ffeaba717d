//! Conversions from service layer failures into HTTP errors.
//!
//! Internal failures are logged here and surface as a bare
//! `internal_server_error` without any detail.

use crate::handler::{Error, ErrorKind};
use crate::service::{AccountError, TokenError};

/// Tracing target for service errors surfacing in handlers.
const TRACING_TARGET_SERVICE_ERROR: &str = "gotalk_server::handler::error";

impl From<AccountError> for Error<'static> {
    fn from(error: AccountError) -> Self {
        match error {
            AccountError::PolicyViolation(violation) => ErrorKind::BadRequest
                .with_message(violation.to_string())
                .with_resource("password"),
            AccountError::InvalidCredentials => {
                ErrorKind::Unauthorized.with_message("Invalid username or password")
            }
            AccountError::AccountAlreadyExists => ErrorKind::Conflict
                .with_message("Username is already taken")
                .with_resource("account"),
            AccountError::AccountNotFound => ErrorKind::NotFound
                .with_message("Account not found")
                .with_resource("account"),
            AccountError::EmptyUpdate => ErrorKind::BadRequest
                .with_message("Provide a new username or password")
                .with_resource("account"),
            AccountError::HashingFailed(error) => {
                tracing::error!(
                    target: TRACING_TARGET_SERVICE_ERROR,
                    error = %error,
                    "credential hashing failed"
                );
                ErrorKind::InternalServerError.into_error()
            }
            AccountError::StoreUnavailable(error) => {
                tracing::error!(
                    target: TRACING_TARGET_SERVICE_ERROR,
                    error = %error,
                    "account store unavailable"
                );
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}

impl From<TokenError> for Error<'static> {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::InvalidOrExpiredToken => ErrorKind::Unauthorized
                .with_message("Invalid or expired authentication token")
                .with_resource("authentication"),
            TokenError::SigningFailed => {
                tracing::error!(
                    target: TRACING_TARGET_SERVICE_ERROR,
                    "session token signing failed"
                );
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::service::{HashingFailed, PolicyViolation};

    #[test]
    fn account_errors_map_to_status() {
        let cases = [
            (
                AccountError::PolicyViolation(PolicyViolation::TooShort),
                ErrorKind::BadRequest,
            ),
            (AccountError::InvalidCredentials, ErrorKind::Unauthorized),
            (AccountError::AccountAlreadyExists, ErrorKind::Conflict),
            (AccountError::AccountNotFound, ErrorKind::NotFound),
            (AccountError::EmptyUpdate, ErrorKind::BadRequest),
            (
                AccountError::HashingFailed(HashingFailed),
                ErrorKind::InternalServerError,
            ),
        ];

        for (error, kind) in cases {
            assert_eq!(Error::from(error).kind(), kind);
        }
    }

    #[test]
    fn policy_violation_message_is_exposed() {
        let error = Error::from(AccountError::PolicyViolation(PolicyViolation::MissingDigit));
        assert_eq!(
            error.message(),
            Some("password must contain at least one digit")
        );
    }

    #[test]
    fn store_failure_hides_detail() {
        let source = io::Error::new(io::ErrorKind::ConnectionRefused, "10.0.0.5:5432 refused");
        let error = Error::from(AccountError::StoreUnavailable(Box::new(source)));

        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.message(), None);
        assert_eq!(error.context(), None);
    }

    #[test]
    fn token_errors_map_to_status() {
        assert_eq!(
            Error::from(TokenError::InvalidOrExpiredToken).kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(
            Error::from(TokenError::SigningFailed).kind(),
            ErrorKind::InternalServerError
        );
    }
}
