//! Local document serving via custom protocol.
//!
//! Registers a `selbridge://` custom protocol so that the hosted document and
//! its assets load from disk without a local HTTP server.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Scheme of the custom protocol.
pub const PROTOCOL: &str = "selbridge";

/// Serves files from a base directory.
///
/// A request for `selbridge://localhost/book/index.html` resolves to
/// `{base_dir}/book/index.html`.
pub struct ContentProvider {
    base_dir: PathBuf,
}

impl ContentProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve a request path to MIME type and content bytes.
    ///
    /// Percent-encoded paths are decoded first. Anything resolving outside
    /// the base directory, including through symlinks, is refused.
    pub fn resolve(&self, path: &str) -> Option<(&'static str, Vec<u8>)> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let decoded = urlencoding::decode(path).ok()?;
        let clean = decoded.trim_start_matches('/');
        if clean.is_empty() {
            return None;
        }

        let file_path = self.base_dir.join(clean);
        let canonical_base = std::fs::canonicalize(&self.base_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) || !canonical_file.is_file() {
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        Some((mime_from_extension(&canonical_file), data))
    }

    /// URL under which `relative` is served.
    pub fn url_for(relative: &str) -> String {
        let encoded: Vec<Cow<'_, str>> = relative
            .trim_start_matches('/')
            .split('/')
            .map(urlencoding::encode)
            .collect();
        format!("{PROTOCOL}://localhost/{}", encoded.join("/"))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

/// Strip the custom protocol prefix from a request URI, leaving the path.
pub fn request_path(uri: &str) -> &str {
    // WebView2 rewrites selbridge://localhost/… to http://selbridge.localhost/…
    uri.strip_prefix("selbridge://localhost")
        .or_else(|| uri.strip_prefix("http://selbridge.localhost"))
        .or_else(|| uri.strip_prefix("selbridge://"))
        .unwrap_or("")
}

/// Guess MIME type from file extension.
fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain",
        Some("xml") => "application/xml",
        _ => "application/octet-stream",
    }
}
