//! Middleware for `axum::Router` and HTTP request processing.
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use axum::Router;
//! use gotalk_server::middleware::RouterExt;
//!
//! let app: Router = Router::new()
//!     .with_error_handling_layer(Duration::from_secs(30))
//!     .with_observability_layer();
//! ```

mod authentication;
mod error_handling;
mod extensions;
mod observability;

pub use authentication::{RouterAuthExt, require_authentication};
pub use extensions::RouterExt;

/// Tracing target for middleware-level failures.
pub const TRACING_TARGET_MIDDLEWARE: &str = "gotalk_server::middleware";
