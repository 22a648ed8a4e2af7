//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, graceful shutdown)
//!     → compression.rs (gzip when the client accepts it)
//!     → routes.rs (classify the path into an asset kind)
//!     → cache.rs (serve the cached binary, or build and publish)
//!     → Send to client
//! ```

pub mod cache;
pub mod compression;
pub mod routes;
pub mod server;

pub use cache::BinaryCache;
pub use compression::CompressionLayer;
pub use routes::{classify, AssetKind};
pub use server::{AppState, DevServer};
