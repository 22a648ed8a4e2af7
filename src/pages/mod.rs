//! Loader and index page generation.
//!
//! # Responsibilities
//! - Generate the loader script that fetches and instantiates the binary
//! - Generate the index HTML page referencing all three assets
//!
//! # Design Decisions
//! - Generators are stateless; invoked per request by the HTTP server
//! - Behind a trait so tests can substitute canned pages

use bytes::Bytes;
use thiserror::Error;

/// Error type for page generation.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("template is missing required variable {0:?}")]
    MissingVariable(&'static str),
}

/// Produces the loader script and index page for the served assets.
pub trait PageGenerator: Send + Sync {
    /// Generate the loader script for a binary served at `binary_path`.
    fn loader(&self, binary_path: &str) -> Result<Bytes, PageError>;

    /// Generate the index HTML page referencing the three asset paths.
    fn index(
        &self,
        script_path: &str,
        loader_path: &str,
        binary_path: &str,
    ) -> Result<Bytes, PageError>;
}

const LOADER_TEMPLATE: &str = r#"(() => {
  if (!WebAssembly.instantiateStreaming) {
    WebAssembly.instantiateStreaming = async (source, importObject) => {
      const buffer = await (await source).arrayBuffer();
      return WebAssembly.instantiate(buffer, importObject);
    };
  }
  const runtime = new global.Runtime();
  WebAssembly.instantiateStreaming(fetch("{binary}"), runtime.importObject)
    .then((result) => runtime.run(result.instance))
    .catch((err) => console.error("wasm load failed:", err));
})();
"#;

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>wasmdev</title>
</head>
<body>
  <script src="{script}"></script>
  <script src="{loader}"></script>
  <!-- binary served at {binary} -->
</body>
</html>
"#;

/// Template-driven page generator.
///
/// Fills `{script}`, `{loader}` and `{binary}` placeholders in the
/// built-in loader and index templates.
pub struct TemplatePages;

impl TemplatePages {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TemplatePages {
    fn default() -> Self {
        Self::new()
    }
}

impl PageGenerator for TemplatePages {
    fn loader(&self, binary_path: &str) -> Result<Bytes, PageError> {
        let body = LOADER_TEMPLATE.replace("{binary}", binary_path);
        Ok(Bytes::from(body))
    }

    fn index(
        &self,
        script_path: &str,
        loader_path: &str,
        binary_path: &str,
    ) -> Result<Bytes, PageError> {
        let body = INDEX_TEMPLATE
            .replace("{script}", script_path)
            .replace("{loader}", loader_path)
            .replace("{binary}", binary_path);
        Ok(Bytes::from(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_embeds_binary_path() {
        let pages = TemplatePages::new();
        let loader = pages.loader("/binary.wasm").unwrap();
        let text = std::str::from_utf8(&loader).unwrap();
        assert!(text.contains("fetch(\"/binary.wasm\")"));
    }

    #[test]
    fn index_references_all_three_assets() {
        let pages = TemplatePages::new();
        let index = pages
            .index("/script.js", "/loader.js", "/binary.wasm")
            .unwrap();
        let text = std::str::from_utf8(&index).unwrap();
        assert!(text.contains("/script.js"));
        assert!(text.contains("/loader.js"));
        assert!(text.contains("/binary.wasm"));
    }
}
