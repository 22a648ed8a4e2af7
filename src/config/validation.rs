//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and required fields
//! - Check the deploy host is a usable absolute URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: DevConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::DevConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("build.command must not be empty")]
    EmptyCommand,

    #[error("build.path must not be empty")]
    EmptyPath,

    #[error("server.port must not be 0")]
    ZeroPort,

    #[error("deploy.host is not a valid URL: {0}")]
    BadDeployHost(String),

    #[error("deploy.host must use http or https, got {0}")]
    DeployHostScheme(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &DevConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.build.command.trim().is_empty() {
        errors.push(ValidationError::EmptyCommand);
    }
    if config.build.path.trim().is_empty() {
        errors.push(ValidationError::EmptyPath);
    }
    if config.server.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    match Url::parse(&config.deploy.host) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::DeployHostScheme(url.scheme().to_string()));
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::BadDeployHost(e.to_string())),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
