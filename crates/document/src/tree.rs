use foundation::arena::Arena;

use crate::events::{Handler, ListenerId, ListenerRegistry, PointerEvent};
use crate::node::{ElementData, Node, NodeData, NodeId};
use crate::style::StyleDeclaration;

/// Mutable, in-memory SVG element tree.
///
/// Nodes are allocated once (parse or builder calls) and never removed; only
/// attributes, inline style and listeners change afterwards.
#[derive(Debug, Default)]
pub struct SvgDocument {
    nodes: Arena<Node>,
    root: Option<NodeId>,
    listeners: ListenerRegistry<SvgDocument>,
}

impl SvgDocument {
    /// An empty document with no root element.
    pub fn new() -> Self {
        Self::default()
    }

    /// A document holding only a root element named `name`.
    pub fn with_root(name: &str) -> Self {
        let mut doc = Self::new();
        let root = doc.push(None, NodeData::Element(ElementData::new(name)));
        doc.root = Some(root);
        doc
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn append_element(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.push(Some(parent), NodeData::Element(ElementData::new(name)))
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(Some(parent), NodeData::Text(text.to_string()))
    }

    pub fn append_comment(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(Some(parent), NodeData::Comment(text.to_string()))
    }

    fn push(&mut self, parent: Option<NodeId>, data: NodeData) -> NodeId {
        let mut node = Node::new(data);
        node.parent = parent;
        let id = NodeId(self.nodes.alloc(node));
        if let Some(p) = parent
            && let Some(parent_node) = self.nodes.get_mut(p.0)
        {
            parent_node.children.push(id);
        }
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.node(id).and_then(Node::as_element)
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id.0).and_then(Node::as_element_mut)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Local tag name (`path`, `text`, `g`).
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(ElementData::local_name)
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attribute(name))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(e) = self.element_mut(id) {
            e.set_attribute(name, value);
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
        self.element_mut(id)
            .is_some_and(|e| e.remove_attribute(name))
    }

    /// Inline style property, `None` when unset.
    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        let style = self.attribute(id, "style")?;
        StyleDeclaration::parse(style)
            .property(property)
            .map(str::to_string)
    }

    /// Writes an inline style property; an empty value clears it. The
    /// `style` attribute is dropped once no declaration is left.
    pub fn set_style_property(&mut self, id: NodeId, property: &str, value: &str) {
        let Some(e) = self.element_mut(id) else {
            return;
        };
        let mut style = StyleDeclaration::parse(e.attribute("style").unwrap_or_default());
        style.set_property(property, value);
        if style.is_empty() {
            e.remove_attribute("style");
        } else {
            e.set_attribute("style", &style.to_string());
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Element children of `id`, skipping text and comments.
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.element(*c).is_some())
            .collect()
    }

    /// Element descendants of `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if self.element(next).is_none() {
                continue;
            }
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    pub fn descendants_by_tag(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|d| self.tag_name(*d) == Some(tag))
            .collect()
    }

    /// First element (root included) whose `id` attribute equals `value`.
    pub fn element_by_id(&self, value: &str) -> Option<NodeId> {
        let root = self.root?;
        if self.attribute(root, "id") == Some(value) {
            return Some(root);
        }
        self.descendants(root)
            .into_iter()
            .find(|d| self.attribute(*d, "id") == Some(value))
    }

    /// Concatenated text of `id` and all its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        match &node.data {
            NodeData::Text(t) => out.push_str(t),
            NodeData::Element(_) => {
                for c in &node.children {
                    self.collect_text(*c, out);
                }
            }
            NodeData::Comment(_) => {}
        }
    }

    pub fn add_listener(
        &mut self,
        node: NodeId,
        event: PointerEvent,
        handler: Handler<SvgDocument>,
    ) -> ListenerId {
        self.listeners.add(node, event, handler)
    }

    pub fn remove_listener(&mut self, node: NodeId, event: PointerEvent, id: ListenerId) -> bool {
        self.listeners.remove(node, event, id)
    }

    pub fn listener_count(&self, node: NodeId, event: PointerEvent) -> usize {
        self.listeners.count(node, event)
    }

    /// Fires `event` at `node`, running its listeners in registration order.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&mut self, node: NodeId, event: PointerEvent) -> usize {
        let handlers = self.listeners.matching(node, event);
        for handler in &handlers {
            handler(self);
        }
        handlers.len()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::SvgDocument;
    use crate::events::PointerEvent;

    fn sample() -> SvgDocument {
        let mut doc = SvgDocument::with_root("svg");
        let root = doc.root().unwrap();
        let shapes = doc.append_element(root, "g");
        doc.set_attribute(shapes, "id", "tracados");
        let a = doc.append_element(shapes, "path");
        doc.set_attribute(a, "id", "A");
        let inner = doc.append_element(shapes, "g");
        let b = doc.append_element(inner, "path");
        doc.set_attribute(b, "id", "B");
        let labels = doc.append_element(root, "g");
        doc.set_attribute(labels, "id", "nomes");
        let t = doc.append_element(labels, "text");
        doc.append_text(t, "Alpha");
        doc
    }

    #[test]
    fn element_by_id_and_descendants() {
        let doc = sample();
        let shapes = doc.element_by_id("tracados").unwrap();
        let paths = doc.descendants_by_tag(shapes, "path");
        let ids: Vec<&str> = paths
            .iter()
            .filter_map(|p| doc.attribute(*p, "id"))
            .collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(doc.child_elements(shapes).len(), 2);
        assert!(doc.element_by_id("missing").is_none());
    }

    #[test]
    fn text_content_collects_descendant_text() {
        let doc = sample();
        let labels = doc.element_by_id("nomes").unwrap();
        assert_eq!(doc.text_content(labels), "Alpha");
    }

    #[test]
    fn style_property_round_trip() {
        let mut doc = sample();
        let a = doc.element_by_id("A").unwrap();
        assert_eq!(doc.style_property(a, "display"), None);
        doc.set_style_property(a, "display", "none");
        assert_eq!(doc.style_property(a, "display").as_deref(), Some("none"));
        assert_eq!(doc.attribute(a, "style"), Some("display: none;"));
        doc.set_style_property(a, "display", "");
        assert_eq!(doc.attribute(a, "style"), None);
    }

    #[test]
    fn empty_document_has_no_root() {
        let doc = SvgDocument::new();
        assert!(doc.root().is_none());
        assert!(doc.element_by_id("tracados").is_none());
    }

    #[test]
    fn dispatch_runs_listeners_with_document_access() {
        let mut doc = sample();
        let a = doc.element_by_id("A").unwrap();
        let id = doc.add_listener(
            a,
            PointerEvent::Enter,
            Rc::new(move |d: &mut SvgDocument| d.set_attribute(a, "fill", "red")),
        );
        assert_eq!(doc.dispatch(a, PointerEvent::Leave), 0);
        assert_eq!(doc.dispatch(a, PointerEvent::Enter), 1);
        assert_eq!(doc.attribute(a, "fill"), Some("red"));

        assert!(doc.remove_listener(a, PointerEvent::Enter, id));
        assert_eq!(doc.listener_count(a, PointerEvent::Enter), 0);
        assert_eq!(doc.dispatch(a, PointerEvent::Enter), 0);
    }
}
