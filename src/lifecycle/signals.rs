//! OS signal handling.
//!
//! # Responsibilities
//! - Translate SIGINT / SIGTERM into shutdown
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Signal receipt starts a graceful drain, not an abrupt exit

/// Resolve when an interrupt or termination signal arrives.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
