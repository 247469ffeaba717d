//! Listener address and timeouts.

use std::net::{IpAddr, SocketAddr};
use std::ops::RangeInclusive;
use std::time::Duration;

use anyhow::ensure;
use clap::Args;

use crate::TRACING_TARGET_CONFIG;

/// Lowest port that does not need elevated privileges.
const MIN_UNPRIVILEGED_PORT: u16 = 1024;

/// Accepted range for both timeouts, in seconds.
const TIMEOUT_SECS: RangeInclusive<u64> = 1..=300;

/// Where to listen and how long to wait.
#[derive(Debug, Clone, Args)]
#[must_use = "config does nothing unless you use it"]
pub struct ServerConfig {
    /// Interface address to listen on.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on (1024 or above).
    #[arg(short = 'p', long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Seconds before a request is answered with a 500 and abandoned.
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,

    /// Seconds in-flight requests may run after a shutdown signal.
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = 30)]
    pub shutdown_timeout: u64,
}

impl ServerConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.port >= MIN_UNPRIVILEGED_PORT,
            "port {} needs root privileges, pick one from {MIN_UNPRIVILEGED_PORT} upwards",
            self.port,
        );

        for (name, secs) in [
            ("request timeout", self.request_timeout),
            ("shutdown timeout", self.shutdown_timeout),
        ] {
            ensure!(
                TIMEOUT_SECS.contains(&secs),
                "{name} of {secs}s is outside {}..={}s",
                TIMEOUT_SECS.start(),
                TIMEOUT_SECS.end(),
            );
        }

        Ok(())
    }

    #[must_use]
    pub const fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }

    /// Whether the host is `0.0.0.0` or `::`.
    #[must_use]
    pub fn binds_to_all_interfaces(&self) -> bool {
        self.host.is_unspecified()
    }

    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            addr = %self.server_addr(),
            request_timeout_secs = self.request_timeout,
            shutdown_timeout_secs = self.shutdown_timeout,
            "server configuration loaded"
        );
    }
}
