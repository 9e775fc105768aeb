//! Document model consumed by the bridge.
//!
//! The bridge only needs four capabilities from a document: walk to a
//! parent, read an attribute, find the first element with a given attribute
//! value, and toggle a class. [`DomTree`] is an in-memory implementation used
//! for headless pages and tests.

use std::collections::BTreeMap;
use std::fmt;

/// Capabilities the bridge requires from a rendered document.
pub trait Document {
    /// Handle to an element of this document.
    type Node: Copy + Eq + fmt::Debug;

    /// Parent element, or `None` for the root or a detached subtree root.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Value of the named attribute, if the element carries it.
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// First attached element, in document order, whose attribute `name`
    /// equals `value`.
    fn find_by_attribute(&self, name: &str, value: &str) -> Option<Self::Node>;

    fn add_class(&mut self, node: Self::Node, class: &str);

    fn remove_class(&mut self, node: Self::Node, class: &str);
}

/// Handle to an element inside a [`DomTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    attached: bool,
}

impl Element {
    fn new(tag: &str, parent: Option<NodeId>, attached: bool) -> Self {
        Self {
            tag: tag.to_string(),
            parent,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            attached,
        }
    }
}

/// Arena-backed element tree rooted at a `body` element.
///
/// Node handles stay valid after [`DomTree::detach`]; a detached element is
/// simply no longer reachable by lookups. A handle from another tree that is
/// out of range here behaves like a detached element with no attributes.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Element>,
}

impl DomTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body", None, true)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0)
    }

    /// Append a new child element and return its handle.
    ///
    /// An unknown `parent` yields a detached element without a parent.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        let element = match self.get_mut(parent) {
            Some(p) => {
                p.children.push(id);
                Element::new(tag, Some(parent), p.attached)
            }
            None => Element::new(tag, None, false),
        };
        self.nodes.push(element);
        id
    }

    /// Append a child element carrying `attribute = value`.
    pub fn append_with_attribute(
        &mut self,
        parent: NodeId,
        tag: &str,
        attribute: &str,
        value: &str,
    ) -> NodeId {
        let id = self.append(parent, tag);
        self.set_attribute(id, attribute, value);
        id
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.get_mut(node) {
            el.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(el) = self.get_mut(node) {
            el.attributes.remove(name);
        }
    }

    pub fn tag(&self, node: NodeId) -> &str {
        self.get(node).map_or("", |el| el.tag.as_str())
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node)
            .map(|el| el.children.as_slice())
            .unwrap_or_default()
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        self.get(node)
            .map(|el| el.classes.as_slice())
            .unwrap_or_default()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).iter().any(|c| c == class)
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(|el| el.attached)
    }

    /// Attached elements carrying `class`, in document order.
    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        self.document_order()
            .into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    /// Remove an element and its subtree from the document.
    pub fn detach(&mut self, node: NodeId) {
        if node == self.root() {
            return;
        }
        let Some(parent) = self.get_mut(node).and_then(|el| el.parent.take()) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|&c| c != node);
        }
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            if let Some(el) = self.get_mut(n) {
                el.attached = false;
                stack.extend(el.children.iter().copied());
            }
        }
    }

    /// Pre-order traversal of the attached tree.
    fn document_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(n) = stack.pop() {
            order.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        order
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for DomTree {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.parent
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node)?.attributes.get(name).map(String::as_str)
    }

    fn find_by_attribute(&self, name: &str, value: &str) -> Option<NodeId> {
        self.document_order()
            .into_iter()
            .find(|&n| self.attribute(n, name) == Some(value))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.get_mut(node) {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.get_mut(node) {
            el.classes.retain(|c| c != class);
        }
    }
}
