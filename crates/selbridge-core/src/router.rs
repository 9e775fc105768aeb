use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, trace};

use selbridge_common::{BridgeOptions, ElementId};

use crate::channel::RemoteProxy;
use crate::document::Document;
use crate::event::InteractionEvent;
use crate::resolve::closest_identified;

/// Routes document interactions to the remote object.
///
/// Once registered, the router owns every click on the document: each event
/// has its default action and propagation suppressed before anything else.
#[derive(Debug, Clone)]
pub struct ClickRouter {
    proxy: Rc<RemoteProxy>,
    method: String,
    attribute: String,
}

impl ClickRouter {
    pub fn new(proxy: Rc<RemoteProxy>, options: &BridgeOptions) -> Self {
        Self {
            proxy,
            method: options.click_method.clone(),
            attribute: options.id_attribute.clone(),
        }
    }

    /// Handle one interaction event. Returns the identifier reported to the
    /// remote object, if any.
    pub fn handle<D>(&self, doc: &D, event: &mut InteractionEvent<D::Node>) -> Option<ElementId>
    where
        D: Document + ?Sized,
    {
        event.prevent_default();
        event.stop_propagation();

        let Some(id) = closest_identified(doc, event.target(), &self.attribute) else {
            trace!(target_node = ?event.target(), "click outside identified elements");
            return None;
        };

        debug!(id = %id, "routing click");
        self.proxy
            .call(&self.method, &[Value::String(id.as_str().to_string())]);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::channel::{open_channel, LocalChannel, RemoteObject};
    use crate::document::DomTree;

    const ATTR: &str = "data-element-id";

    type Calls = Rc<RefCell<Vec<(String, Vec<Value>)>>>;

    async fn router_with_recorder() -> (ClickRouter, Calls) {
        let calls: Calls = Rc::default();
        let sink = Rc::clone(&calls);
        let object: Rc<dyn RemoteObject> = Rc::new(move |method: &str, args: &[Value]| {
            sink.borrow_mut().push((method.to_string(), args.to_vec()));
        });
        let mut channel = LocalChannel::new();
        channel.publish("backend", object);
        let proxy = open_channel(&channel, "backend").await.unwrap();
        (
            ClickRouter::new(Rc::new(proxy), &BridgeOptions::default()),
            calls,
        )
    }

    #[tokio::test]
    async fn identified_click_is_reported_once() {
        let (router, calls) = router_with_recorder().await;
        let mut tree = DomTree::new();
        let a = tree.append_with_attribute(tree.root(), "div", ATTR, "a");

        let mut event = InteractionEvent::new(a);
        let routed = router.handle(&tree, &mut event);

        assert_eq!(routed.unwrap(), "a");
        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "onElementClicked");
        assert_eq!(calls[0].1, vec![Value::from("a")]);
    }

    #[tokio::test]
    async fn unidentified_click_is_suppressed_but_not_reported() {
        let (router, calls) = router_with_recorder().await;
        let mut tree = DomTree::new();
        let link = tree.append(tree.root(), "a");

        let mut event = InteractionEvent::new(link);
        assert!(router.handle(&tree, &mut event).is_none());

        assert!(event.default_prevented());
        assert!(event.propagation_stopped());
        assert!(calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn custom_method_and_attribute_are_used() {
        let calls: Calls = Rc::default();
        let sink = Rc::clone(&calls);
        let object: Rc<dyn RemoteObject> = Rc::new(move |method: &str, args: &[Value]| {
            sink.borrow_mut().push((method.to_string(), args.to_vec()));
        });
        let mut channel = LocalChannel::new();
        channel.publish("backend", object);
        let proxy = open_channel(&channel, "backend").await.unwrap();

        let options = BridgeOptions {
            click_method: "picked".into(),
            id_attribute: "data-node".into(),
            ..Default::default()
        };
        let router = ClickRouter::new(Rc::new(proxy), &options);

        let mut tree = DomTree::new();
        let node = tree.append_with_attribute(tree.root(), "li", "data-node", "n1");
        let ignored = tree.append_with_attribute(tree.root(), "li", ATTR, "n2");

        router.handle(&tree, &mut InteractionEvent::new(node));
        router.handle(&tree, &mut InteractionEvent::new(ignored));

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "picked");
        assert_eq!(calls[0].1, vec![Value::from("n1")]);
    }
}
