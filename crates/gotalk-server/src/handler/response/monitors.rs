//! Monitor response types.

/// Body returned by the health endpoint.
pub const HEALTHY: &str = "Server is healthy !\n";
