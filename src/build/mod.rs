//! Artifact building.
//!
//! # Responsibilities
//! - Define the narrow interface the HTTP server consumes
//! - Compile the configured source into a WASM binary
//! - Content-address the result with a SHA-256 hash
//!
//! # Design Decisions
//! - `Builder::build` is synchronous and blocking; async callers run it
//!   through `tokio::task::spawn_blocking`
//! - Builders are stateless and deterministic for a fixed configuration,
//!   so redundant concurrent builds are wasted work, never corruption

pub mod command;

use bytes::Bytes;
use thiserror::Error;

pub use command::CommandBuilder;

/// A compiled binary plus its content hash.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// The compiled WASM bytes.
    pub contents: Bytes,

    /// SHA-256 digest of `contents`.
    pub hash: Vec<u8>,
}

impl Artifact {
    /// Hex rendering of the content hash, used in logs and hosted URLs.
    pub fn hash_hex(&self) -> String {
        hex::encode(&self.hash)
    }
}

/// Error type for artifact builds.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to run compiler {command:?}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("compiler exited with {status}: {stderr}")]
    CompilerFailed {
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("build I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Produces compiled binary bytes plus a content hash.
///
/// The server holds a `dyn Builder` so tests can substitute a counting
/// stub for the real compiler.
pub trait Builder: Send + Sync {
    fn build(&self) -> Result<Artifact, BuildError>;
}
