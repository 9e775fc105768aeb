//! Headless document environment hosting a bridge.
//!
//! [`Page`] plays the role the browser plays for the document-side script:
//! it fires document-ready once, delivers clicks to whatever listener the
//! bridge registered, and resolves host calls against its global names.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::{error, warn};

use selbridge_common::{BridgeError, BridgeOptions, ElementId};

use crate::bridge::Bridge;
use crate::channel::TransportProvider;
use crate::dispatch::{HostCall, HostSurface};
use crate::document::Document;
use crate::event::InteractionEvent;
use crate::highlight::SelectionState;

/// Global names visible to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Globals(BTreeSet<String>);

impl Globals {
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl HostSurface for Globals {
    fn expose(&mut self, name: &str) {
        self.0.insert(name.to_string());
    }
}

/// A loaded document, with or without a live bridge.
pub struct Page<D: Document> {
    document: D,
    bridge: Option<Bridge<D>>,
    globals: Globals,
    ready_fired: bool,
}

impl<D: Document> Page<D> {
    pub fn new(document: D) -> Self {
        Self {
            document,
            bridge: None,
            globals: Globals::default(),
            ready_fired: false,
        }
    }

    /// Fire document-ready and run the bridge handshake.
    ///
    /// Only the first call does anything. A failed handshake is logged and
    /// leaves the page inert for good.
    pub async fn ready(&mut self, provider: &dyn TransportProvider, options: &BridgeOptions) {
        if self.ready_fired {
            warn!("document-ready already fired, ignoring");
            return;
        }
        self.ready_fired = true;

        match Bridge::initialize(provider, options).await {
            Ok(bridge) => {
                bridge.expose(&mut self.globals);
                self.bridge = Some(bridge);
            }
            Err(e @ BridgeError::TransportUnavailable(_)) => {
                error!(error = %e, "channel transport is not available, bridge disabled");
            }
            Err(e) => {
                error!(error = %e, "remote object not found on channel, bridge disabled");
            }
        }
    }

    /// Deliver a click on `target` and return the event after dispatch.
    pub fn click(&self, target: D::Node) -> InteractionEvent<D::Node> {
        self.click_routed(target).0
    }

    /// Same as [`Page::click`], also returning the identifier routed.
    pub fn click_routed(
        &self,
        target: D::Node,
    ) -> (InteractionEvent<D::Node>, Option<ElementId>) {
        let mut event = InteractionEvent::new(target);
        let routed = match &self.bridge {
            Some(bridge) => bridge.on_interaction(&self.document, &mut event),
            None => None,
        };
        (event, routed)
    }

    /// Call a global by name, as the host would.
    ///
    /// Names the bridge never exposed are undefined; this is the only error
    /// the host can observe.
    pub fn call(&mut self, name: &str, args: Vec<Value>) -> Result<(), BridgeError> {
        let call = HostCall::new(name, args);
        self.call_host(&call)
    }

    pub fn call_host(&mut self, call: &HostCall) -> Result<(), BridgeError> {
        match &mut self.bridge {
            Some(bridge) if self.globals.contains(&call.name) => {
                bridge.invoke(&mut self.document, call)
            }
            _ => Err(BridgeError::UndefinedSymbol(call.name.clone())),
        }
    }

    pub fn is_bridged(&self) -> bool {
        self.bridge.is_some()
    }

    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    pub fn selection(&self) -> Option<&SelectionState> {
        self.bridge.as_ref().map(Bridge::selection)
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::channel::{LocalChannel, NoTransport, RemoteObject};
    use crate::document::DomTree;

    const ATTR: &str = "data-element-id";

    fn backend_channel(calls: &Rc<RefCell<usize>>) -> LocalChannel {
        let counter = Rc::clone(calls);
        let object: Rc<dyn RemoteObject> = Rc::new(move |_method: &str, _args: &[Value]| {
            *counter.borrow_mut() += 1;
        });
        let mut channel = LocalChannel::new();
        channel.publish("backend", object);
        channel
    }

    #[test]
    fn click_before_ready_is_untouched() {
        let mut tree = DomTree::new();
        let a = tree.append_with_attribute(tree.root(), "div", ATTR, "a");
        let page = Page::new(tree);

        let event = page.click(a);
        assert!(!event.default_prevented());
        assert!(!event.propagation_stopped());
    }

    #[tokio::test]
    async fn click_reads_page_through_shared_borrow() {
        let calls = Rc::default();
        let channel = backend_channel(&calls);
        let mut tree = DomTree::new();
        let a = tree.append_with_attribute(tree.root(), "div", ATTR, "a");
        let mut page = Page::new(tree);
        page.ready(&channel, &BridgeOptions::default()).await;

        let page = &page;
        let event = page.click(a);
        let (_, routed) = page.click_routed(a);
        assert!(event.default_prevented());
        assert_eq!(routed.unwrap(), "a");
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn call_before_ready_is_undefined() {
        let mut page = Page::new(DomTree::new());
        let err = page.call("highlightElement", vec![json!("a")]).unwrap_err();
        assert_eq!(err, BridgeError::UndefinedSymbol("highlightElement".into()));
    }

    #[tokio::test]
    async fn ready_exposes_entry_point() {
        let calls = Rc::default();
        let channel = backend_channel(&calls);
        let mut page = Page::new(DomTree::new());

        page.ready(&channel, &BridgeOptions::default()).await;
        assert!(page.is_bridged());
        assert_eq!(page.globals().iter().collect::<Vec<_>>(), vec!["highlightElement"]);
        assert!(page.selection().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_ready_is_not_retried() {
        let calls = Rc::default();
        let channel = backend_channel(&calls);
        let mut page = Page::new(DomTree::new());

        page.ready(&NoTransport, &BridgeOptions::default()).await;
        page.ready(&channel, &BridgeOptions::default()).await;

        assert!(!page.is_bridged());
        assert!(page.globals().is_empty());
    }

    #[tokio::test]
    async fn missing_object_leaves_no_partial_registration() {
        let mut page = Page::new(DomTree::new());
        page.ready(&LocalChannel::new(), &BridgeOptions::default()).await;

        assert!(!page.is_bridged());
        assert!(page.globals().is_empty());
        assert!(page.selection().is_none());
    }

    #[tokio::test]
    async fn click_routed_reports_identifier() {
        let calls = Rc::default();
        let channel = backend_channel(&calls);
        let mut tree = DomTree::new();
        let a = tree.append_with_attribute(tree.root(), "div", ATTR, "a");
        let mut page = Page::new(tree);
        page.ready(&channel, &BridgeOptions::default()).await;

        let (event, routed) = page.click_routed(a);
        assert!(event.default_prevented());
        assert_eq!(routed.unwrap(), "a");
        assert_eq!(*calls.borrow(), 1);
    }
}
