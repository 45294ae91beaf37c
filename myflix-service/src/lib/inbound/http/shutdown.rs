use std::future::Future;
use std::io;

/// Resolves on ctrl-c. Without a signal handler the server runs until killed.
pub async fn shutdown_signal() {
    wait_for_signal(tokio::signal::ctrl_c()).await
}

/// Resolves when `signal` fires. A signal that fails to install never resolves,
/// so the server keeps serving instead of shutting down at startup.
pub async fn wait_for_signal<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_received_signal_resolves() {
        let result =
            tokio::time::timeout(Duration::from_millis(100), wait_for_signal(async { Ok(()) }))
                .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_failed_signal_install_keeps_waiting() {
        let failing = async { Err(io::Error::new(io::ErrorKind::Other, "no handler")) };
        let result =
            tokio::time::timeout(Duration::from_millis(100), wait_for_signal(failing)).await;
        assert!(result.is_err());
    }
}
