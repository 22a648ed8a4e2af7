//! Tests for the deploy client against a mock hosting service.

use std::net::SocketAddr;

use axum::{extract::Path, routing::post, Json, Router};
use bytes::Bytes;
use serde_json::json;
use sha2::{Digest, Sha256};

use wasmdev::build::Artifact;
use wasmdev::deploy::DeployClient;
use wasmdev::pages::TemplatePages;

/// Mock hosting service: acknowledges every upload with a CDN URL
/// derived from the upload path.
async fn start_mock_host(addr: SocketAddr) {
    async fn upload(Path(path): Path<String>) -> Json<serde_json::Value> {
        Json(json!({ "url": format!("https://cdn.test/{path}") }))
    }

    let app = Router::new().route("/upload/{*path}", post(upload));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
}

fn artifact() -> Artifact {
    let contents = Bytes::from_static(b"\0asm deployable bytes");
    Artifact {
        hash: Sha256::digest(&contents).to_vec(),
        contents,
    }
}

#[tokio::test]
async fn push_uploads_all_assets_and_derives_the_page_url() {
    let addr: SocketAddr = "127.0.0.1:28421".parse().unwrap();
    start_mock_host(addr).await;
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    let artifact = artifact();
    let hash = artifact.hash_hex();

    let client = DeployClient::new(&format!("http://{addr}/")).unwrap();
    let deployment = client.push(&artifact, &TemplatePages::new()).await.unwrap();

    assert_eq!(
        deployment.binary,
        format!("https://cdn.test/binary/{hash}.wasm")
    );
    assert_eq!(
        deployment.loader,
        format!("https://cdn.test/loader/{hash}.js")
    );
    assert!(deployment.script.starts_with("https://cdn.test/script/"));
    // page is content-addressed on the local host
    assert_eq!(deployment.page, format!("http://{addr}/{}", &hash[..16]));
}

#[tokio::test]
async fn push_against_a_dead_host_fails() {
    let client = DeployClient::new("http://127.0.0.1:28429/").unwrap();
    let err = client
        .push(&artifact(), &TemplatePages::new())
        .await
        .unwrap_err();
    assert!(matches!(err, wasmdev::deploy::DeployError::Http(_)));
}
