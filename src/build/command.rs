//! Compiler-backed builder.

use std::process::Command;

use bytes::Bytes;
use sha2::{Digest, Sha256};

use crate::build::{Artifact, BuildError, Builder};
use crate::config::BuildConfig;

/// Builds the artifact by shelling out to the configured compiler.
///
/// The compiler is invoked as
/// `{command} build -o {tmp}/main.wasm [-tags {tags}] [flags..] {path}`
/// with `GOOS=js GOARCH=wasm` in the environment, matching the toolchain
/// contract for WASM output.
pub struct CommandBuilder {
    config: BuildConfig,
}

impl CommandBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }
}

impl Builder for CommandBuilder {
    fn build(&self) -> Result<Artifact, BuildError> {
        let dir = tempfile::tempdir()?;
        let out_path = dir.path().join("main.wasm");

        let mut cmd = Command::new(&self.config.command);
        cmd.env("GOOS", "js")
            .env("GOARCH", "wasm")
            .arg("build")
            .arg("-o")
            .arg(&out_path);
        if !self.config.build_tags.is_empty() {
            cmd.arg("-tags").arg(&self.config.build_tags);
        }
        cmd.args(self.config.flags.split_whitespace());
        cmd.arg(&self.config.path);

        let output = cmd.output().map_err(|source| BuildError::Spawn {
            command: self.config.command.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(BuildError::CompilerFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let contents = std::fs::read(&out_path)?;
        let hash = Sha256::digest(&contents).to_vec();

        Ok(Artifact {
            contents: Bytes::from(contents),
            hash,
        })
    }
}
