//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once, at process start
//! - Widen the filter when verbose diagnostics are requested
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - `RUST_LOG` always wins over config defaults

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ObservabilityConfig;

/// Initialize the global tracing subscriber.
///
/// Must be called at most once; later calls would panic inside
/// `tracing-subscriber`.
pub fn init_logging(config: &ObservabilityConfig) {
    let default_filter = if config.verbose {
        "wasmdev=debug,tower_http=debug".to_string()
    } else {
        config.log_filter.clone()
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
