use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON body of every error response.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse<'a> {
    /// Stable snake_case identifier of the failure.
    pub name: Cow<'a, str>,
    /// Human-readable explanation.
    pub message: Cow<'a, str>,
    /// The resource the error relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Cow<'a, str>>,
    /// Additional detail for the client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Cow<'a, str>>,
    /// Carried in the status line only.
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "The request body or one of its fields is invalid",
        StatusCode::BAD_REQUEST,
    );
    pub const MISSING_AUTH_TOKEN: Self = Self::new(
        "missing_auth_token",
        "A bearer token is required for this route",
        StatusCode::UNAUTHORIZED,
    );
    pub const MALFORMED_AUTH_TOKEN: Self = Self::new(
        "malformed_auth_token",
        "Expected an Authorization header of the form `Bearer <token>`",
        StatusCode::UNAUTHORIZED,
    );
    pub const UNAUTHORIZED: Self = Self::new(
        "unauthorized",
        "The credentials or bearer token were rejected",
        StatusCode::UNAUTHORIZED,
    );
    pub const NOT_FOUND: Self = Self::new(
        "not_found",
        "The requested resource was not found",
        StatusCode::NOT_FOUND,
    );
    pub const CONFLICT: Self = Self::new(
        "conflict",
        "The request conflicts with an existing account",
        StatusCode::CONFLICT,
    );
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "Something went wrong on our side",
        StatusCode::INTERNAL_SERVER_ERROR,
    );

    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            resource: None,
            context: None,
            status,
        }
    }

    /// Replaces the default message.
    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: message.into(),
            ..self
        }
    }

    /// Appends a path segment to the resource.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        self.resource = Some(join(self.resource.take(), resource.into(), "/"));
        self
    }

    /// Appends to the context, separated by `; `.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        self.context = Some(join(self.context.take(), context.into(), "; "));
        self
    }
}

fn join<'a>(head: Option<Cow<'a, str>>, tail: Cow<'a, str>, separator: &str) -> Cow<'a, str> {
    match head {
        Some(head) => Cow::Owned([head.as_ref(), tail.as_ref()].join(separator)),
        None => tail,
    }
}

impl IntoResponse for ErrorResponse<'_> {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resources_join_with_slash() {
        let response = ErrorResponse::NOT_FOUND
            .with_resource("account")
            .with_resource("password");

        assert_eq!(response.resource.as_deref(), Some("account/password"));
    }

    #[test]
    fn message_is_replaced() {
        let response = ErrorResponse::BAD_REQUEST
            .with_message("password must contain at least one digit");

        assert_eq!(&response.message, "password must contain at least one digit");
    }

    #[test]
    fn contexts_join_with_semicolon() {
        let response = ErrorResponse::BAD_REQUEST
            .with_context("username: length")
            .with_context("password: required");

        assert_eq!(
            response.context.as_deref(),
            Some("username: length; password: required")
        );
    }

    #[test]
    fn status_is_not_serialized() -> anyhow::Result<()> {
        let response = ErrorResponse::CONFLICT.with_resource("account");
        let json = serde_json::to_value(&response)?;

        assert_eq!(json["name"], "conflict");
        assert_eq!(json["resource"], "account");
        assert!(json.get("context").is_none());
        assert!(json.get("status").is_none());
        Ok(())
    }
}
