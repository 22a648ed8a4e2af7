//! Gzip response compression middleware.
//!
//! # Responsibilities
//! - Inspect `Accept-Encoding` and pass through untouched when the client
//!   does not accept gzip
//! - Encode the response body and fix up `Content-Encoding`,
//!   `Content-Type` and `Content-Length` when it does
//!
//! # Design Decisions
//! - Implemented as a tower `Layer`/`Service` pair so it composes onto the
//!   router like any other middleware
//! - Byte-for-byte transparent to the inner handler: the handler never
//!   learns whether compression is active

use std::convert::Infallible;
use std::future::Future;
use std::io::Write;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, HeaderValue, Request, Response};
use flate2::write::GzEncoder;
use flate2::Compression;
use tower::{Layer, Service};

/// Layer applying [`CompressionService`] to the wrapped service.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompressionLayer;

impl CompressionLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for CompressionLayer {
    type Service = CompressionService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CompressionService { inner }
    }
}

/// Service wrapper that gzip-encodes responses for accepting clients.
#[derive(Debug, Clone)]
pub struct CompressionService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for CompressionService<S>
where
    S: Service<Request<Body>, Response = Response<Body>, Error = Infallible>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = Response<Body>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let wants_gzip = accepts_gzip(req.headers());
        // swap so we drive the service that reported readiness
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let response = inner.call(req).await?;
            if !wants_gzip {
                return Ok(response);
            }
            Ok(compress(response).await)
        })
    }
}

/// True when `Accept-Encoding` carries a "gzip" token.
///
/// Quality parameters are ignored; `gzip;q=0.5` counts as accepting.
fn accepts_gzip(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT_ENCODING)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|token| token.split(';').next())
        .any(|token| token.trim().eq_ignore_ascii_case("gzip"))
}

async fn compress(response: Response<Body>) -> Response<Body> {
    let (mut parts, body) = response.into_parts();

    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!(error = %err, "failed to buffer response body for compression");
            parts.headers.remove(header::CONTENT_LENGTH);
            return Response::from_parts(parts, Body::empty());
        }
    };

    let mut encoder = GzEncoder::new(Vec::with_capacity(bytes.len() / 2), Compression::default());
    let encoded = match encoder
        .write_all(&bytes)
        .and_then(|()| encoder.finish())
    {
        Ok(encoded) => encoded,
        Err(err) => {
            // serve uncompressed rather than fail the request
            tracing::error!(error = %err, "gzip encoding failed");
            return Response::from_parts(parts, Body::from(bytes));
        }
    };

    parts
        .headers
        .insert(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));
    if !parts.headers.contains_key(header::CONTENT_TYPE) {
        parts
            .headers
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html"));
    }
    // encoded length differs from the original
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, Body::from(encoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tower::{service_fn, ServiceExt};

    async fn inner(_req: Request<Body>) -> Result<Response<Body>, Infallible> {
        Ok(Response::new(Body::from("hello hello hello")))
    }

    fn wrapped(
    ) -> impl Service<Request<Body>, Response = Response<Body>, Error = Infallible> {
        CompressionLayer::new().layer(service_fn(inner))
    }

    fn gunzip(bytes: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        GzDecoder::new(bytes).read_to_end(&mut out).unwrap();
        out
    }

    #[tokio::test]
    async fn passes_through_without_gzip_token() {
        let request = Request::builder()
            .header(header::ACCEPT_ENCODING, "br")
            .body(Body::empty())
            .unwrap();

        let response = wrapped().oneshot(request).await.unwrap();
        assert!(!response.headers().contains_key(header::CONTENT_ENCODING));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"hello hello hello");
    }

    #[tokio::test]
    async fn encodes_for_accepting_client() {
        let request = Request::builder()
            .header(header::ACCEPT_ENCODING, "br, gzip;q=0.8")
            .body(Body::empty())
            .unwrap();

        let response = wrapped().oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get(header::CONTENT_ENCODING).unwrap(),
            "gzip"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html"
        );
        assert!(!response.headers().contains_key(header::CONTENT_LENGTH));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(gunzip(&body), b"hello hello hello");
    }

    #[test]
    fn token_matching_is_not_substring_matching() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT_ENCODING, "gzipped-nonsense".parse().unwrap());
        assert!(!accepts_gzip(&headers));

        headers.insert(header::ACCEPT_ENCODING, "deflate, GZIP".parse().unwrap());
        assert!(accepts_gzip(&headers));
    }
}
