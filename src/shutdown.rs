use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cancel `token` when the process receives Ctrl-C or, on unix, SIGTERM.
/// Registered once per process; the token is shared by everything that has to wind down.
pub fn spawn_signal_listener(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for Ctrl-C: {e}");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    log::error!("Failed to listen for SIGTERM: {e}");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => log::info!("Received Ctrl-C, stopping probes..."),
            _ = terminate => log::info!("Received SIGTERM, stopping probes..."),
            _ = token.cancelled() => return,
        }
        token.cancel();
    })
}

/// Cancel `token` once `max_duration` has passed.
pub fn spawn_deadline(token: CancellationToken, max_duration: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(max_duration) => {
                log::info!(
                    "Run deadline of {} reached, stopping probes...",
                    humantime::format_duration(max_duration)
                );
                token.cancel();
            }
            _ = token.cancelled() => {}
        }
    })
}
