use std::fmt::Write as _;

use crate::node::{NodeData, NodeId};
use crate::tree::SvgDocument;

impl SvgDocument {
    /// Serialises the document back to SVG markup (no XML declaration).
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        if let Some(root) = self.root() {
            self.write_node(root, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        match &node.data {
            NodeData::Text(t) => out.push_str(&escape_text(t)),
            NodeData::Comment(c) => {
                let _ = write!(out, "<!--{c}-->");
            }
            NodeData::Element(e) => {
                out.push('<');
                out.push_str(&e.name);
                for attr in &e.attrs {
                    let _ = write!(out, " {}=\"{}\"", attr.name, escape_attr(&attr.value));
                }
                if node.children.is_empty() {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                for child in &node.children {
                    self.write_node(*child, out);
                }
                let _ = write!(out, "</{}>", e.name);
            }
        }
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::tree::SvgDocument;

    #[test]
    fn round_trips_structure() {
        let text = r#"<svg xmlns="http://www.w3.org/2000/svg"><!-- c --><g id="nomes"><text id="1">A &amp; B</text><path d="M0 0"/></g></svg>"#;
        let doc = SvgDocument::parse(text).unwrap();
        assert_eq!(doc.to_svg_string(), text);
    }

    #[test]
    fn escapes_attribute_values() {
        let mut doc = SvgDocument::with_root("svg");
        let root = doc.root().unwrap();
        let t = doc.append_element(root, "text");
        doc.set_attribute(t, "data-x", r#"a"<b>"#);
        doc.append_text(t, "1 < 2");
        assert_eq!(
            doc.to_svg_string(),
            r#"<svg><text data-x="a&quot;&lt;b&gt;">1 &lt; 2</text></svg>"#
        );
    }

    #[test]
    fn keeps_prefixed_namespace_declarations() {
        let text = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink"><use xlink:href="#a"/></svg>"##;
        let doc = SvgDocument::parse(text).unwrap();
        let out = doc.to_svg_string();
        assert!(out.contains(r#"xmlns:xlink="http://www.w3.org/1999/xlink""#));
        assert!(out.contains(r##"<use xlink:href="#a"/>"##));
        let again = SvgDocument::parse(&out).unwrap();
        assert_eq!(again.to_svg_string(), out);
    }

    #[test]
    fn empty_document_serialises_to_nothing() {
        assert_eq!(SvgDocument::new().to_svg_string(), "");
    }
}
