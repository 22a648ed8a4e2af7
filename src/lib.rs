//! Local WASM development server library.
//!
//! Compiles a program to a WebAssembly binary on demand, serves it over
//! HTTP together with a generated loader script and index page, and can
//! push the artifact to a remote hosting service.

// Core subsystems
pub mod assets;
pub mod build;
pub mod config;
pub mod http;
pub mod pages;

// Remote hosting
pub mod deploy;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use build::{Artifact, Builder};
pub use config::DevConfig;
pub use http::DevServer;
pub use lifecycle::Shutdown;

/// Client version reported by the `version` subcommand and sent with
/// deploy requests.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");
