//! The demo native object published to documents as `backend`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::Value;
use tracing::{info, warn};

use selbridge_common::ElementId;
use selbridge_core::dispatch::identifier_arg;
use selbridge_core::RemoteObject;

/// Clicked ids waiting to be highlighted back in the document.
pub type EchoQueue = Rc<RefCell<VecDeque<ElementId>>>;

/// Logs every click reported by the document and, when echoing, queues the
/// clicked id so the main loop can select it.
pub struct SelectionBackend {
    click_method: String,
    echo: Option<EchoQueue>,
}

impl SelectionBackend {
    pub fn new(click_method: impl Into<String>, echo: Option<EchoQueue>) -> Self {
        Self {
            click_method: click_method.into(),
            echo,
        }
    }
}

impl RemoteObject for SelectionBackend {
    fn invoke(&self, method: &str, args: &[Value]) {
        if method != self.click_method {
            warn!(method, "unknown backend method ignored");
            return;
        }

        let Some(id) = identifier_arg(args) else {
            warn!(argc = args.len(), "click report without an element id ignored");
            return;
        };

        info!(id = %id, "element clicked");
        if let Some(queue) = &self.echo {
            queue.borrow_mut().push_back(ElementId::new(id));
        }
    }
}
