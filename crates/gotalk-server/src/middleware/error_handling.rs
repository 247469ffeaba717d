//! Fallback responses for layer errors and handler panics.

use std::any::Any;
use std::future::ready;

use axum::response::{IntoResponse, Response};
use futures::future::{BoxFuture, FutureExt};
use tower::timeout::error::Elapsed;

use super::TRACING_TARGET_MIDDLEWARE;
use crate::handler::{Error, ErrorKind};

/// Answers errors raised by inner tower layers, such as the request timeout.
pub fn handle_error(err: tower::BoxError) -> BoxFuture<'static, Response> {
    let error = if err.is::<Elapsed>() {
        tracing::error!(target: TRACING_TARGET_MIDDLEWARE, "request timed out");
        ErrorKind::InternalServerError.with_message("Request timeout")
    } else {
        tracing::error!(
            target: TRACING_TARGET_MIDDLEWARE,
            error = %err,
            "unhandled middleware error"
        );
        Error::new(ErrorKind::InternalServerError)
    };

    ready(error.into_response()).boxed()
}

/// Answers a panicking handler with a bare `internal_server_error`.
pub fn catch_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let reason = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");

    tracing::error!(target: TRACING_TARGET_MIDDLEWARE, reason, "handler panicked");
    ErrorKind::InternalServerError.into_response()
}
