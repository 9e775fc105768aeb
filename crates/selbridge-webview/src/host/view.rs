use tracing::{debug, warn};
use wry::WebView;

use selbridge_core::HostCall;

use crate::ipc::js_call_global;

/// What the host knows about the document currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub url: String,
    pub title: String,
    /// Set once the document reported a completed handshake; cleared when a
    /// new navigation starts.
    pub bridged: bool,
}

impl ViewState {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            bridged: false,
        }
    }
}

/// Handle to the WebView showing the bridged document.
pub struct DocumentView {
    pub(super) webview: WebView,
    pub(super) entry_point: String,
    pub(super) state: ViewState,
}

impl DocumentView {
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub(super) fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    pub fn is_bridged(&self) -> bool {
        self.state.bridged
    }

    /// Ask the document to move its selection to `id`.
    pub fn highlight(&self, id: &str) -> Result<(), wry::Error> {
        self.call(&HostCall::highlight(self.entry_point.as_str(), id))
    }

    /// Call a global exposed by the document.
    ///
    /// Calls before the handshake completes are sent anyway; the document
    /// drops them while the global is undefined.
    pub fn call(&self, call: &HostCall) -> Result<(), wry::Error> {
        if !self.state.bridged {
            warn!(name = %call.name, "host call before the document bridge is ready");
        }
        debug!(name = %call.name, argc = call.args.len(), "host call into document");
        self.webview.evaluate_script(&js_call_global(call))
    }

    /// Reposition the WebView within its parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }

    /// Open devtools (if enabled).
    pub fn open_devtools(&self) {
        self.webview.open_devtools();
    }
}
