//! Selection state and the visual marker that follows it.

use tracing::debug;

use selbridge_common::{BridgeOptions, ElementId};

use crate::document::Document;

/// The currently highlighted identifier, or none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    current: Option<ElementId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&ElementId> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

/// Owns the [`SelectionState`] and keeps the marker class in sync with it.
///
/// At most one element carries the marker after any call: the previous one
/// is always unmarked before a new one is looked up.
#[derive(Debug, Clone)]
pub struct HighlightSynchronizer {
    state: SelectionState,
    attribute: String,
    marker: String,
}

impl HighlightSynchronizer {
    pub fn new(options: &BridgeOptions) -> Self {
        Self {
            state: SelectionState::new(),
            attribute: options.id_attribute.clone(),
            marker: options.marker_class.clone(),
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.state
    }

    /// Move the selection to `id`.
    ///
    /// An identifier with no matching element is not retained; the
    /// selection becomes empty instead.
    pub fn highlight<D>(&mut self, doc: &mut D, id: &str) -> Option<D::Node>
    where
        D: Document + ?Sized,
    {
        self.clear(doc);

        let node = doc.find_by_attribute(&self.attribute, id);
        match node {
            Some(node) => {
                doc.add_class(node, &self.marker);
                self.state.current = Some(ElementId::new(id));
                debug!(id, "element highlighted");
            }
            None => debug!(id, "highlight target not found, selection cleared"),
        }
        node
    }

    /// Unmark the selected element, if it is still in the document, and
    /// empty the selection.
    pub fn clear<D>(&mut self, doc: &mut D)
    where
        D: Document + ?Sized,
    {
        if let Some(previous) = self.state.current.take() {
            if let Some(node) = doc.find_by_attribute(&self.attribute, previous.as_str()) {
                doc.remove_class(node, &self.marker);
            }
        }
    }
}
