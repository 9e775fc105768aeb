//! Hosting a bridged document in a WebView.
//!
//! `DocumentHost` publishes named objects to the document, builds the
//! `wry::WebView` with the bridge script injected, and turns the IPC traffic
//! it receives into calls on those objects.

use std::rc::Rc;
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use selbridge_common::BridgeOptions;
use selbridge_core::{LocalChannel, RemoteObject};

use crate::content::ContentProvider;
use crate::events::{PageLoadState, WebViewEvent};
use crate::ipc::{IpcRejection, IpcRequest};

pub mod handlers;
mod lifecycle;
mod types;
mod view;

pub use types::ViewConfig;
pub use view::{DocumentView, ViewState};

/// Outcome of dispatching one IPC body.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// A published object received the call.
    Invoked { object: String, method: String },
    /// The document finished its handshake.
    Ready,
    /// The call addressed an object the host never published.
    UnknownObject(String),
    /// The body was not a valid bridge message.
    Rejected(IpcRejection),
}

/// Owns the objects published to the document and the event queue of the
/// WebView showing it.
pub struct DocumentHost {
    /// Event sink. Handlers registered on the WebView push here; the main
    /// loop drains it.
    pub(crate) events: Arc<Mutex<Vec<WebViewEvent>>>,
    objects: LocalChannel,
    options: BridgeOptions,
    content_provider: Option<Arc<ContentProvider>>,
}

impl DocumentHost {
    pub fn new(options: BridgeOptions) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            objects: LocalChannel::new(),
            options,
            content_provider: None,
        }
    }

    pub fn options(&self) -> &BridgeOptions {
        &self.options
    }

    /// Publish an object to documents created after this call.
    pub fn publish(&mut self, name: impl Into<String>, object: Rc<dyn RemoteObject>) {
        self.objects.publish(name, object);
    }

    /// Names of all published objects.
    pub fn published(&self) -> impl Iterator<Item = &str> {
        self.objects.names()
    }

    /// Set the content provider for serving the document via `selbridge://`.
    pub fn set_content_provider(&mut self, provider: ContentProvider) {
        self.content_provider = Some(Arc::new(provider));
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<WebViewEvent> {
        let mut events = match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::take(&mut *events)
    }

    /// Dispatch one raw IPC body from the document.
    pub fn dispatch_ipc(&self, body: &str) -> Dispatch {
        let request = match IpcRequest::parse(body) {
            Ok(r) => r,
            Err(e) => {
                warn!(body_len = body.len(), error = %e, "IPC message rejected");
                return Dispatch::Rejected(e);
            }
        };

        match request {
            IpcRequest::BridgeReady => {
                info!("document bridge ready");
                Dispatch::Ready
            }
            IpcRequest::Invoke(invoke) => match self.objects.get(&invoke.object) {
                Some(object) => {
                    debug!(
                        object = %invoke.object,
                        method = %invoke.method,
                        argc = invoke.args.len(),
                        "remote call from document"
                    );
                    object.invoke(&invoke.method, &invoke.args);
                    Dispatch::Invoked {
                        object: invoke.object,
                        method: invoke.method,
                    }
                }
                None => {
                    warn!(object = %invoke.object, "call for unpublished object ignored");
                    Dispatch::UnknownObject(invoke.object)
                }
            },
        }
    }

    /// Process pending events against a view: dispatch IPC calls and keep
    /// the view's tracked state current. Returns every drained event.
    pub fn pump(&self, view: &mut DocumentView) -> Vec<WebViewEvent> {
        self.process(view.state_mut())
    }

    pub(crate) fn process(&self, state: &mut ViewState) -> Vec<WebViewEvent> {
        let events = self.drain_events();
        for event in &events {
            match event {
                WebViewEvent::IpcMessage { body } => {
                    if self.dispatch_ipc(body) == Dispatch::Ready {
                        state.bridged = true;
                    }
                }
                WebViewEvent::PageLoad { state: load, url } => {
                    debug!(state = ?load, url = %url, "page load");
                    if *load == PageLoadState::Started {
                        state.bridged = false;
                        state.url = url.clone();
                    }
                }
                WebViewEvent::TitleChanged { title } => {
                    state.title = title.clone();
                }
                WebViewEvent::NavigationAllowed { url } => {
                    debug!(url = %url, "navigation allowed");
                }
                WebViewEvent::NavigationBlocked { url } => {
                    debug!(url = %url, "navigation blocked");
                }
            }
        }
        events
    }

    #[cfg(test)]
    pub(crate) fn push_event(&self, event: WebViewEvent) {
        if let Ok(mut evts) = self.events.lock() {
            evts.push(event);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::cell::RefCell;

    type Calls = Rc<RefCell<Vec<(String, Vec<Value>)>>>;

    fn host_with_backend() -> (DocumentHost, Calls) {
        let calls: Calls = Rc::default();
        let sink = Rc::clone(&calls);
        let backend: Rc<dyn RemoteObject> = Rc::new(move |method: &str, args: &[Value]| {
            sink.borrow_mut().push((method.to_string(), args.to_vec()));
        });
        let mut host = DocumentHost::new(BridgeOptions::default());
        host.publish("backend", backend);
        (host, calls)
    }

    fn click_body(id: &str) -> String {
        json!({
            "kind": "invoke",
            "payload": {"object": "backend", "method": "onElementClicked", "args": [id]}
        })
        .to_string()
    }

    #[test]
    fn invoke_reaches_published_object() {
        let (host, calls) = host_with_backend();
        let outcome = host.dispatch_ipc(&click_body("a"));
        assert_eq!(
            outcome,
            Dispatch::Invoked {
                object: "backend".into(),
                method: "onElementClicked".into()
            }
        );
        assert_eq!(
            *calls.borrow(),
            vec![("onElementClicked".to_string(), vec![json!("a")])]
        );
    }

    #[test]
    fn invoke_for_unknown_object_is_ignored() {
        let (host, calls) = host_with_backend();
        let body = json!({
            "kind": "invoke",
            "payload": {"object": "settings", "method": "set", "args": []}
        })
        .to_string();
        assert_eq!(host.dispatch_ipc(&body), Dispatch::UnknownObject("settings".into()));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn garbage_is_rejected() {
        let (host, calls) = host_with_backend();
        assert_eq!(host.dispatch_ipc("{"), Dispatch::Rejected(IpcRejection::Malformed));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn published_lists_names() {
        let (host, _) = host_with_backend();
        assert_eq!(host.published().collect::<Vec<_>>(), vec!["backend"]);
    }

    #[test]
    fn process_tracks_bridge_and_page_state() {
        let (host, calls) = host_with_backend();
        let mut state = ViewState::new("selbridge://localhost/index.html");

        host.push_event(WebViewEvent::IpcMessage {
            body: r#"{"kind":"bridge_ready","payload":null}"#.into(),
        });
        host.push_event(WebViewEvent::TitleChanged {
            title: "Chapter 1".into(),
        });
        host.push_event(WebViewEvent::IpcMessage {
            body: click_body("a"),
        });

        let events = host.process(&mut state);
        assert_eq!(events.len(), 3);
        assert!(state.bridged);
        assert_eq!(state.title, "Chapter 1");
        assert_eq!(calls.borrow().len(), 1);
        assert!(host.drain_events().is_empty());
    }

    #[test]
    fn new_navigation_resets_bridge() {
        let (host, _) = host_with_backend();
        let mut state = ViewState::new("about:blank");
        state.bridged = true;

        host.push_event(WebViewEvent::PageLoad {
            state: PageLoadState::Started,
            url: "selbridge://localhost/next.html".into(),
        });
        host.process(&mut state);

        assert!(!state.bridged);
        assert_eq!(state.url, "selbridge://localhost/next.html");
    }
}
