//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dev
//! server. All types derive Serde traits for deserialization from config
//! files. Every value is immutable for the lifetime of the process once
//! the config has been accepted.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DevConfig {
    /// Local HTTP server settings.
    pub server: ServerConfig,

    /// Compiler invocation settings.
    pub build: BuildConfig,

    /// Remote hosting settings for the `deploy` subcommand.
    pub deploy: DeployConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Local HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,

    /// Cache the compiled binary after the first build instead of
    /// rebuilding on every request.
    pub cache: bool,

    /// Open a browser window at the root URL after startup.
    pub open: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            cache: false,
            open: false,
        }
    }
}

/// Compiler invocation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Compiler command to invoke (e.g. "go").
    pub command: String,

    /// Extra flags passed through to the compiler, whitespace separated.
    pub flags: String,

    /// Build tags passed to the compiler.
    pub build_tags: String,

    /// Source package or directory to compile.
    pub path: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            command: "go".to_string(),
            flags: String::new(),
            build_tags: String::new(),
            path: ".".to_string(),
        }
    }
}

/// Remote hosting configuration for `deploy`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Base URL of the hosting service.
    pub host: String,

    /// Output template. Variables: `{page}`, `{script}`, `{loader}`,
    /// `{binary}`.
    pub template: String,

    /// Print all template variables as a JSON blob instead of rendering
    /// the template.
    pub json: bool,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            host: "https://deploy.wasmdev.io".to_string(),
            template: "{page}".to_string(),
            json: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Emit debug-level diagnostics (build timings, cache hits).
    pub verbose: bool,

    /// Default tracing filter when `RUST_LOG` is unset and `verbose` is
    /// off.
    pub log_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_filter: "wasmdev=info,tower_http=warn".to_string(),
        }
    }
}
