//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use sha2::{Digest, Sha256};

use wasmdev::build::{Artifact, BuildError, Builder};
use wasmdev::config::DevConfig;
use wasmdev::http::DevServer;
use wasmdev::lifecycle::Shutdown;
use wasmdev::pages::TemplatePages;

/// Builder stub producing fixed bytes and counting invocations.
pub struct CountingBuilder {
    calls: Arc<AtomicU32>,
    contents: Bytes,
}

impl CountingBuilder {
    pub fn new(contents: &'static [u8]) -> (Arc<Self>, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        let builder = Arc::new(Self {
            calls: calls.clone(),
            contents: Bytes::from_static(contents),
        });
        (builder, calls)
    }
}

impl Builder for CountingBuilder {
    fn build(&self) -> Result<Artifact, BuildError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Artifact {
            hash: Sha256::digest(&self.contents).to_vec(),
            contents: self.contents.clone(),
        })
    }
}

/// Builder stub that always fails.
#[allow(dead_code)]
pub struct FailingBuilder;

impl Builder for FailingBuilder {
    fn build(&self) -> Result<Artifact, BuildError> {
        Err(BuildError::Spawn {
            command: "stub".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no compiler"),
        })
    }
}

/// Spawn a dev server on `addr` with the given builder.
///
/// Returns the shutdown handle; drop it (or trigger it) to stop the
/// server.
pub async fn spawn_server(addr: SocketAddr, cache: bool, builder: Arc<dyn Builder>) -> Shutdown {
    let mut config = DevConfig::default();
    config.server.cache = cache;
    config.server.port = addr.port();

    let server = DevServer::new(config, builder, Arc::new(TemplatePages::new()));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    let shutdown = Shutdown::new();
    let notified = shutdown.notified();
    tokio::spawn(async move {
        let _ = server.run(listener, notified).await;
    });

    shutdown
}

/// Non-pooling client so each test connection is independent.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
