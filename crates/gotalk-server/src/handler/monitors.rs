//! Liveness endpoint.

use axum::Router;
use axum::routing::get;

use crate::handler::response::HEALTHY;
use crate::service::ServiceState;

/// Reports that the process is up. Touches no dependency.
async fn health() -> &'static str {
    HEALTHY
}

/// Returns a [`Router`] with all health monitoring routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health))
}
