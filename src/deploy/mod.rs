//! Remote artifact deployment.
//!
//! # Responsibilities
//! - Upload the compiled binary and generated loader to the hosting
//!   service
//! - Render the resulting hosted URLs for the user (template or JSON)

pub mod client;
pub mod output;

pub use client::{DeployClient, DeployError, Deployment};
pub use output::render_output;
