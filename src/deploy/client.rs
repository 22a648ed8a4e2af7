//! Upload client for the hosting service.

use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::assets::BOOTSTRAP_SCRIPT;
use crate::build::Artifact;
use crate::pages::{PageError, PageGenerator};
use crate::CLIENT_VERSION;

/// Hosted URLs returned by a successful deployment.
#[derive(Debug, Clone, Serialize)]
pub struct Deployment {
    /// Hosted entry page.
    pub page: String,
    /// Hosted bootstrap script.
    pub script: String,
    /// Hosted loader script.
    pub loader: String,
    /// Hosted WASM binary.
    pub binary: String,
}

/// Error type for deployments.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("invalid deploy host: {0}")]
    Host(#[from] url::ParseError),

    #[error("upload failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("hosting service rejected upload with status {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("loader generation failed: {0}")]
    Page(#[from] PageError),
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

/// Client pushing artifacts to the remote hosting service.
pub struct DeployClient {
    http: reqwest::Client,
    host: Url,
}

impl DeployClient {
    pub fn new(host: &str) -> Result<Self, DeployError> {
        Ok(Self {
            http: reqwest::Client::new(),
            host: Url::parse(host)?,
        })
    }

    /// Upload the binary, loader and bootstrap script; returns the hosted
    /// URLs. The loader is generated against the hosted binary URL, and
    /// the entry page address is content-addressed by the binary hash, so
    /// redeploying identical bytes lands on the same page.
    pub async fn push(
        &self,
        artifact: &Artifact,
        pages: &dyn PageGenerator,
    ) -> Result<Deployment, DeployError> {
        let hash = artifact.hash_hex();

        let binary = self
            .upload(
                &format!("upload/binary/{hash}.wasm"),
                artifact.contents.to_vec(),
                "application/wasm",
            )
            .await?;

        let loader_contents = pages.loader(&binary)?;
        let loader = self
            .upload(
                &format!("upload/loader/{hash}.js"),
                loader_contents.to_vec(),
                "application/javascript",
            )
            .await?;
        let script = self
            .upload(
                &format!("upload/script/{CLIENT_VERSION}.js"),
                BOOTSTRAP_SCRIPT.as_bytes().to_vec(),
                "application/javascript",
            )
            .await?;

        let page = self.host.join(&hash[..16])?.to_string();

        Ok(Deployment {
            page,
            script,
            loader,
            binary,
        })
    }

    async fn upload(
        &self,
        path: &str,
        body: Vec<u8>,
        content_type: &'static str,
    ) -> Result<String, DeployError> {
        let url = self.host.join(path)?;
        tracing::debug!(url = %url, bytes = body.len(), "Uploading");

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .header("x-client-version", CLIENT_VERSION)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeployError::Rejected {
                status,
                body: response.text().await.unwrap_or_default(),
            });
        }

        let parsed: UploadResponse = response.json().await?;
        Ok(parsed.url)
    }
}
