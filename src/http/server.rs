//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all asset handler
//! - Wire up middleware (gzip compression, request tracing)
//! - Classify each request path and serve the matching asset
//! - Build the binary lazily and publish it to the cache
//! - Serve with graceful shutdown

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::assets::BOOTSTRAP_SCRIPT;
use crate::build::Builder;
use crate::config::DevConfig;
use crate::http::cache::BinaryCache;
use crate::http::compression::CompressionLayer;
use crate::http::routes::{classify, AssetKind};
use crate::pages::PageGenerator;

/// Canonical paths the generated pages reference.
pub const SCRIPT_PATH: &str = "/script.js";
pub const LOADER_PATH: &str = "/loader.js";
pub const BINARY_PATH: &str = "/binary.wasm";

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub builder: Arc<dyn Builder>,
    pub pages: Arc<dyn PageGenerator>,
    pub cache: Arc<BinaryCache>,
    pub cache_enabled: bool,
}

/// The local dev server.
pub struct DevServer {
    router: Router,
    config: DevConfig,
}

impl DevServer {
    /// Create a new server from config plus the builder and page
    /// generator collaborators.
    pub fn new(
        config: DevConfig,
        builder: Arc<dyn Builder>,
        pages: Arc<dyn PageGenerator>,
    ) -> Self {
        let state = AppState {
            builder,
            pages,
            cache: Arc::new(BinaryCache::new()),
            cache_enabled: config.server.cache,
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(serve_asset)
            .with_state(state)
            .layer(CompressionLayer::new())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` resolves, then drain in-flight
    /// requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            cache = self.config.server.cache,
            "Dev server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Dev server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &DevConfig {
        &self.config
    }
}

/// Catch-all asset handler.
///
/// The method is deliberately not checked; classification is purely by
/// path suffix.
async fn serve_asset(State(state): State<AppState>, request: Request<Body>) -> Response {
    let path = request.uri().path();

    match classify(path) {
        AssetKind::Favicon => StatusCode::OK.into_response(),
        AssetKind::Binary => serve_binary(&state).await,
        AssetKind::Loader => match state.pages.loader(BINARY_PATH) {
            Ok(contents) => asset_response("application/javascript", contents.into()),
            Err(err) => generation_failure("loader", err),
        },
        AssetKind::Script => {
            asset_response("application/javascript", Body::from(BOOTSTRAP_SCRIPT))
        }
        AssetKind::Index => match state.pages.index(SCRIPT_PATH, LOADER_PATH, BINARY_PATH) {
            Ok(contents) => asset_response("text/html", contents.into()),
            Err(err) => generation_failure("index", err),
        },
    }
}

/// Serve the compiled binary, building it on demand.
///
/// With caching enabled the first successful build is published to the
/// cache and every later request is served from it without touching the
/// builder. With caching disabled every request builds.
async fn serve_binary(state: &AppState) -> Response {
    let started = Instant::now();

    if state.cache_enabled {
        if let Some(artifact) = state.cache.get() {
            tracing::debug!(
                hash = %artifact.hash_hex(),
                elapsed = ?started.elapsed(),
                "Serving WASM binary from cache"
            );
            return asset_response("application/wasm", Body::from(artifact.contents.clone()));
        }
    }

    let builder = state.builder.clone();
    let built = tokio::task::spawn_blocking(move || builder.build()).await;

    let artifact = match built {
        Ok(Ok(artifact)) => Arc::new(artifact),
        Ok(Err(err)) => {
            tracing::error!(error = %err, "WASM build failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "build failed\n").into_response();
        }
        Err(err) => {
            tracing::error!(error = %err, "Build task panicked");
            return (StatusCode::INTERNAL_SERVER_ERROR, "build failed\n").into_response();
        }
    };

    tracing::debug!(
        hash = %artifact.hash_hex(),
        elapsed = ?started.elapsed(),
        "Compiled WASM binary"
    );

    if state.cache_enabled {
        // swap-once: a concurrent build may already have published
        state.cache.publish(artifact.clone());
    }

    asset_response("application/wasm", Body::from(artifact.contents.clone()))
}

fn asset_response(content_type: &'static str, body: Body) -> Response {
    ([(header::CONTENT_TYPE, content_type)], body).into_response()
}

fn generation_failure(kind: &'static str, err: crate::pages::PageError) -> Response {
    tracing::error!(error = %err, page = kind, "Page generation failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "page generation failed\n").into_response()
}
