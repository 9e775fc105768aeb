/// Configuration for creating the document WebView.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// URL of the document to load.
    pub url: String,
    /// Whether to enable dev tools (always on in debug builds).
    pub devtools: bool,
    /// Custom user agent string.
    pub user_agent: Option<String>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            url: "about:blank".to_string(),
            devtools: cfg!(debug_assertions),
            user_agent: Some(format!("selbridge/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

impl ViewConfig {
    /// Create a config that loads a URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn devtools(mut self, enabled: bool) -> Self {
        self.devtools = enabled || cfg!(debug_assertions);
        self
    }
}
