//! Process lifecycle: startup, signals, shutdown, browser launch.

pub mod browser;
pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::shutdown_signal;
