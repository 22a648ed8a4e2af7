//! Observability: structured logging.

pub mod logging;

pub use logging::init_logging;
