//! Authentication middleware for protected routes.

use axum::Router;
use axum::extract::Request;
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;

use crate::extract::AuthState;
use crate::service::ServiceState;

/// Extension trait for `axum::`[`Router`] to apply authentication middleware.
pub trait RouterAuthExt<S> {
    /// Requires a valid bearer token for every route added so far.
    ///
    /// Uses `route_layer`, so unmatched paths still reach the fallback
    /// instead of being rejected as unauthenticated.
    fn with_authentication(self, state: ServiceState) -> Self;
}

impl RouterAuthExt<ServiceState> for Router<ServiceState> {
    fn with_authentication(self, state: ServiceState) -> Self {
        self.route_layer(from_fn_with_state(state, require_authentication))
    }
}

/// Requires a valid authentication token to proceed with the request.
///
/// Requests without an `Authorization: Bearer <token>` header are rejected
/// before any token parsing. Requests with a token that fails verification
/// are rejected as unauthorized. Otherwise the account identifier is cached
/// in the request extensions as [`AuthState`] for the handler.
///
/// ```rust,no_run
/// use axum::Router;
/// use axum::middleware::from_fn_with_state;
/// use gotalk_server::middleware::require_authentication;
/// use gotalk_server::service::{ServiceConfig, ServiceState};
///
/// # async fn build() -> anyhow::Result<()> {
/// let state = ServiceState::from_config(&ServiceConfig::builder().build()?).await?;
/// let _app: Router<ServiceState> =
///     Router::new().route_layer(from_fn_with_state(state.clone(), require_authentication));
/// # Ok(())
/// # }
/// ```
pub async fn require_authentication(
    AuthState(_): AuthState,
    request: Request,
    next: Next,
) -> Response {
    next.run(request).await
}
