//! Request path classification.

/// The four recognized asset routes plus the index catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// `/favicon.ico` — ignored, empty response.
    Favicon,
    /// `/binary.wasm` — the compiled WASM module.
    Binary,
    /// `/loader.js` — the generated loader script.
    Loader,
    /// `/script.js` — the embedded bootstrap script.
    Script,
    /// Everything else — the generated index page.
    Index,
}

/// Classify a request path by suffix.
///
/// Matches are evaluated in fixed priority order; a path matching several
/// suffixes resolves to the first branch. Prefix segments are irrelevant,
/// so `/foo/binary.wasm` is still the binary route.
pub fn classify(path: &str) -> AssetKind {
    if path.ends_with("/favicon.ico") {
        AssetKind::Favicon
    } else if path.ends_with("/binary.wasm") {
        AssetKind::Binary
    } else if path.ends_with("/loader.js") {
        AssetKind::Loader
    } else if path.ends_with("/script.js") {
        AssetKind::Script
    } else {
        AssetKind::Index
    }
}
