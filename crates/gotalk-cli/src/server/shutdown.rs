//! Signals that stop accepting new connections.

use std::future::{Future, pending};
use std::io;

use crate::TRACING_TARGET_SERVER_SHUTDOWN;

/// Resolves on the first Ctrl+C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let interrupt = on_signal("SIGINT", tokio::signal::ctrl_c());

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                let received = async move {
                    stream
                        .recv()
                        .await
                        .ok_or_else(|| io::Error::other("signal stream closed"))
                };
                on_signal("SIGTERM", received).await;
            }
            Err(err) => on_signal("SIGTERM", async { Err(err) }).await,
        }
    };

    #[cfg(not(unix))]
    let terminate = pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
}

/// Waits for `signal`; a listener that cannot be installed never fires.
async fn on_signal<F>(name: &'static str, signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            signal = name,
            "shutdown requested, draining connections"
        ),
        Err(err) => {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                signal = name,
                error = %err,
                "cannot listen for shutdown signal"
            );
            pending::<()>().await;
        }
    }
}
