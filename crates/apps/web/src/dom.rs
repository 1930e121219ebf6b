use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CssStyleDeclaration, Element, Event, HtmlElement, NodeList, SvgElement};

use document::{Handler, MapDocument, PointerEvent};

/// Live DOM subtree rooted at the map's `<svg>` element.
///
/// Cloning is cheap: clones share the same underlying elements.
#[derive(Debug, Clone)]
pub struct WebDocument {
    root: Option<Element>,
}

impl WebDocument {
    pub fn new(root: Option<Element>) -> Self {
        Self { root }
    }
}

/// Keeps the JS callback alive while it is registered.
pub struct WebListener {
    closure: Closure<dyn FnMut(Event)>,
}

impl MapDocument for WebDocument {
    type Node = Element;
    type Listener = WebListener;

    fn root(&self) -> Option<Element> {
        self.root.clone()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        let root = self.root.as_ref()?;
        if root.id() == id {
            return Some(root.clone());
        }
        root.query_selector(&id_selector(id)).ok().flatten()
    }

    fn child_elements(&self, node: &Element) -> Vec<Element> {
        let children = node.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .collect()
    }

    fn descendants_by_tag(&self, node: &Element, tag: &str) -> Vec<Element> {
        match node.query_selector_all(tag) {
            Ok(list) => elements_of(&list),
            Err(_) => Vec::new(),
        }
    }

    fn tag_name(&self, node: &Element) -> String {
        node.local_name()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn remove_attribute(&mut self, node: &Element, name: &str) {
        let _ = node.remove_attribute(name);
    }

    fn style_property(&self, node: &Element, property: &str) -> Option<String> {
        let value = style_of(node)?.get_property_value(property).ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn set_style_property(&mut self, node: &Element, property: &str, value: &str) {
        let Some(style) = style_of(node) else {
            return;
        };
        if value.is_empty() {
            let _ = style.remove_property(property);
        } else {
            let _ = style.set_property(property, value);
        }
    }

    fn add_listener(
        &mut self,
        node: &Element,
        event: PointerEvent,
        handler: Handler<Self>,
    ) -> WebListener {
        let doc = self.clone();
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            let mut doc = doc.clone();
            handler(&mut doc);
        }) as Box<dyn FnMut(Event)>);
        let _ = node
            .add_event_listener_with_callback(event.as_str(), closure.as_ref().unchecked_ref());
        WebListener { closure }
    }

    fn remove_listener(&mut self, node: &Element, event: PointerEvent, listener: WebListener) {
        let _ = node.remove_event_listener_with_callback(
            event.as_str(),
            listener.closure.as_ref().unchecked_ref(),
        );
    }
}

fn style_of(node: &Element) -> Option<CssStyleDeclaration> {
    if let Some(svg) = node.dyn_ref::<SvgElement>() {
        return Some(svg.style());
    }
    node.dyn_ref::<HtmlElement>().map(HtmlElement::style)
}

fn elements_of(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

/// Attribute selector for `id`; IBGE codes start with a digit, which `#id`
/// selectors reject.
pub(crate) fn id_selector(id: &str) -> String {
    let escaped = id.replace('\\', "\\\\").replace('"', "\\\"");
    format!("[id=\"{escaped}\"]")
}

#[cfg(test)]
mod tests {
    use super::id_selector;

    #[test]
    fn id_selector_quotes_numeric_ids() {
        assert_eq!(id_selector("3205309"), r#"[id="3205309"]"#);
        assert_eq!(id_selector(r#"a"b"#), r#"[id="a\"b"]"#);
    }
}
