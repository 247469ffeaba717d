//! [`RouterExt`] for the timeout, panic and tracing layers.

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower_http::catch_panic::CatchPanicLayer;

use crate::middleware::error_handling::{catch_panic, handle_error};
use crate::middleware::observability::{
    create_propagate_request_id_layer, create_request_id_layer, create_sensitive_headers_layer,
    create_trace_layer,
};

/// Outer layers shared by every route, applied once in the binary.
pub trait RouterExt<S> {
    /// Turns timeouts and panics into `internal_server_error` responses.
    ///
    /// The handler future is dropped once `timeout` elapses.
    fn with_error_handling_layer(self, timeout: Duration) -> Self;

    /// Tags each request with an `x-request-id` and traces it.
    ///
    /// Credentials in `Authorization` and `Cookie` are redacted from traces.
    fn with_observability_layer(self) -> Self;
}

impl<S> RouterExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_error_handling_layer(self, timeout: Duration) -> Self {
        // The timeout error surfaces through `handle_error`.
        self.layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_error))
                .layer(CatchPanicLayer::custom(catch_panic))
                .layer(TimeoutLayer::new(timeout)),
        )
    }

    fn with_observability_layer(self) -> Self {
        // Outermost first: the id and redaction must exist before tracing starts.
        let stack = ServiceBuilder::new()
            .layer(create_request_id_layer())
            .layer(create_sensitive_headers_layer())
            .layer(create_trace_layer())
            .layer(create_propagate_request_id_layer());

        self.layer(stack)
    }
}
