use crate::events::{Handler, ListenerId, PointerEvent};
use crate::node::NodeId;
use crate::tree::SvgDocument;

/// The DOM surface the map styler needs.
///
/// Implemented by [`SvgDocument`] for native use and tests, and by the web
/// crate over live `web_sys::Element`s.
pub trait MapDocument: Sized {
    type Node: Clone + PartialEq + std::fmt::Debug;
    /// Whatever is needed to unregister a listener later.
    type Listener;

    fn root(&self) -> Option<Self::Node>;
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    fn child_elements(&self, node: &Self::Node) -> Vec<Self::Node>;
    /// Descendant elements with local tag name `tag`, in document order.
    fn descendants_by_tag(&self, node: &Self::Node, tag: &str) -> Vec<Self::Node>;
    fn tag_name(&self, node: &Self::Node) -> String;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&mut self, node: &Self::Node, name: &str);

    fn style_property(&self, node: &Self::Node, property: &str) -> Option<String>;
    /// An empty `value` clears the property.
    fn set_style_property(&mut self, node: &Self::Node, property: &str, value: &str);

    fn add_listener(
        &mut self,
        node: &Self::Node,
        event: PointerEvent,
        handler: Handler<Self>,
    ) -> Self::Listener;
    fn remove_listener(&mut self, node: &Self::Node, event: PointerEvent, listener: Self::Listener);
}

impl MapDocument for SvgDocument {
    type Node = NodeId;
    type Listener = ListenerId;

    fn root(&self) -> Option<NodeId> {
        SvgDocument::root(self)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        SvgDocument::element_by_id(self, id)
    }

    fn child_elements(&self, node: &NodeId) -> Vec<NodeId> {
        SvgDocument::child_elements(self, *node)
    }

    fn descendants_by_tag(&self, node: &NodeId, tag: &str) -> Vec<NodeId> {
        SvgDocument::descendants_by_tag(self, *node, tag)
    }

    fn tag_name(&self, node: &NodeId) -> String {
        SvgDocument::tag_name(self, *node)
            .unwrap_or_default()
            .to_string()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        SvgDocument::attribute(self, *node, name).map(str::to_string)
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        SvgDocument::set_attribute(self, *node, name, value);
    }

    fn remove_attribute(&mut self, node: &NodeId, name: &str) {
        SvgDocument::remove_attribute(self, *node, name);
    }

    fn style_property(&self, node: &NodeId, property: &str) -> Option<String> {
        SvgDocument::style_property(self, *node, property)
    }

    fn set_style_property(&mut self, node: &NodeId, property: &str, value: &str) {
        SvgDocument::set_style_property(self, *node, property, value);
    }

    fn add_listener(
        &mut self,
        node: &NodeId,
        event: PointerEvent,
        handler: Handler<Self>,
    ) -> ListenerId {
        SvgDocument::add_listener(self, *node, event, handler)
    }

    fn remove_listener(&mut self, node: &NodeId, event: PointerEvent, listener: ListenerId) {
        SvgDocument::remove_listener(self, *node, event, listener);
    }
}
