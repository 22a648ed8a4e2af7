//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags ──┐
//!             ├─▶ schema.rs (DevConfig) ─▶ validation.rs ─▶ accepted config
//! TOML file ──┘
//! ```

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{BuildConfig, DeployConfig, DevConfig, ObservabilityConfig, ServerConfig};
