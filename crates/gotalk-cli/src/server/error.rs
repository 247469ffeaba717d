//! Failures of the listener and the serve loop.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

pub type ServerResult<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener could not be bound.
    #[error("cannot listen on {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// Accepting or serving connections failed.
    #[error("server stopped unexpectedly: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    pub fn bind_error(address: SocketAddr, source: io::Error) -> Self {
        Self::Bind { address, source }
    }

    /// Operator hint for the common bind failures.
    pub fn suggestion(&self) -> Option<&'static str> {
        let Self::Bind { source, .. } = self else {
            return None;
        };

        let hint = match source.kind() {
            io::ErrorKind::AddrInUse => "another process already listens on this port",
            io::ErrorKind::PermissionDenied => "choose a port of 1024 or above",
            io::ErrorKind::AddrNotAvailable => "HOST is not an address of this machine",
            _ => return None,
        };

        Some(hint)
    }
}

#[cfg(test)]
mod tests {
    use std::net::{Ipv4Addr, SocketAddrV4};

    use super::*;

    fn address() -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 3000))
    }

    #[test]
    fn port_in_use_has_hint() {
        let error = ServerError::bind_error(
            address(),
            io::Error::new(io::ErrorKind::AddrInUse, "address in use"),
        );

        assert!(error.to_string().starts_with("cannot listen on 127.0.0.1:3000"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn other_failures_have_no_hint() {
        let bind = ServerError::bind_error(address(), io::Error::other("boom"));
        let runtime = ServerError::Runtime(io::Error::other("boom"));

        assert!(bind.suggestion().is_none());
        assert!(runtime.suggestion().is_none());
    }
}
