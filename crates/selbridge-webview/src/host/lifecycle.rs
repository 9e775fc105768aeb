use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, warn};
use wry::http::Response;
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::content::{request_path, PROTOCOL};
use crate::script::bridge_init_script;

use super::types::ViewConfig;
use super::view::{DocumentView, ViewState};
use super::DocumentHost;

impl DocumentHost {
    /// Create the document WebView as a child of the given window, placed
    /// at `bounds`.
    ///
    /// The bridge script is injected before any document script runs, with
    /// every object published so far.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        window: &W,
        bounds: wry::Rect,
        config: ViewConfig,
    ) -> Result<DocumentView, wry::Error> {
        let events = Arc::clone(&self.events);
        let script = bridge_init_script(self.options(), self.published());

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_devtools(config.devtools)
            .with_initialization_script(&script);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = Self::attach_ipc_handler(builder, Arc::clone(&events));
        builder = Self::attach_page_load_handler(builder, Arc::clone(&events));
        builder = Self::attach_title_handler(builder, Arc::clone(&events));
        builder = Self::attach_navigation_handler(builder, Arc::clone(&events));
        builder = self.attach_custom_protocol(builder);
        builder = builder.with_url(&config.url);

        let webview = builder.build_as_child(window)?;

        debug!(url = %config.url, "document WebView created");

        Ok(DocumentView {
            webview,
            entry_point: self.options().entry_point.clone(),
            state: ViewState::new(config.url),
        })
    }

    fn attach_custom_protocol<'a>(&self, mut builder: WebViewBuilder<'a>) -> WebViewBuilder<'a> {
        if let Some(provider) = &self.content_provider {
            let cp = Arc::clone(provider);
            builder = builder.with_custom_protocol(PROTOCOL.to_string(), move |_wv_id, request| {
                let uri = request.uri().to_string();
                let path = request_path(&uri);

                match cp.resolve(path) {
                    Some((mime, data)) => respond(200, mime, data),
                    None => {
                        warn!(path = %path, "custom protocol: file not found");
                        respond(404, "text/plain", b"Not Found".to_vec())
                    }
                }
            });
        }
        builder
    }
}

fn respond(status: u16, mime: &str, body: Vec<u8>) -> Response<Cow<'static, [u8]>> {
    Response::builder()
        .status(status)
        .header("Content-Type", mime)
        .body(Cow::Owned(body))
        .unwrap_or_else(|e| {
            warn!(error = %e, "custom protocol: response build failed");
            Response::new(Cow::Owned(Vec::new()))
        })
}
