use selbridge_common::ElementId;

use crate::document::Document;

/// Identifier of the nearest element, starting at `target` and walking up
/// through its ancestors, that carries `attribute`.
///
/// An attribute present with an empty value still counts as identified.
pub fn closest_identified<D>(doc: &D, target: D::Node, attribute: &str) -> Option<ElementId>
where
    D: Document + ?Sized,
{
    let mut current = Some(target);
    while let Some(node) = current {
        if let Some(value) = doc.attribute(node, attribute) {
            return Some(ElementId::new(value));
        }
        current = doc.parent(node);
    }
    None
}
