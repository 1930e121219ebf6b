use tracing::debug;

use crate::error::DocumentError;
use crate::node::NodeId;
use crate::tree::SvgDocument;

impl SvgDocument {
    /// Parses SVG markup into a mutable document.
    ///
    /// Namespace declarations are kept as plain `xmlns`/`xmlns:*` attributes
    /// on the element that introduces them, so serialisation reproduces them.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let opts = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let xml = roxmltree::Document::parse_with_options(text, opts)
            .map_err(|e| DocumentError::Xml(e.to_string()))?;

        let xml_root = xml.root_element();
        if xml_root.tag_name().name() != "svg" {
            return Err(DocumentError::NotSvg(qualified_tag(xml_root)));
        }

        let mut doc = SvgDocument::with_root(&qualified_tag(xml_root));
        let Some(root) = doc.root() else {
            return Err(DocumentError::NotSvg(String::new()));
        };
        copy_element(&mut doc, root, xml_root);

        debug!(nodes = doc.node_count(), "parsed svg document");
        Ok(doc)
    }
}

impl std::str::FromStr for SvgDocument {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SvgDocument::parse(s)
    }
}

fn copy_element(doc: &mut SvgDocument, target: NodeId, src: roxmltree::Node<'_, '_>) {
    for (name, value) in new_namespace_decls(src) {
        doc.set_attribute(target, &name, &value);
    }
    for attr in src.attributes() {
        let name = qualify(src, attr.namespace(), attr.name());
        doc.set_attribute(target, &name, attr.value());
    }

    for child in src.children() {
        if child.is_element() {
            let el = doc.append_element(target, &qualified_tag(child));
            copy_element(doc, el, child);
        } else if child.is_text() {
            doc.append_text(target, child.text().unwrap_or_default());
        } else if child.is_comment() {
            doc.append_comment(target, child.text().unwrap_or_default());
        }
    }
}

/// Declarations visible on `node` but not on its parent element.
fn new_namespace_decls(node: roxmltree::Node<'_, '_>) -> Vec<(String, String)> {
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|p| p.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();

    node.namespaces()
        .filter(|ns| ns.name() != Some("xml"))
        .filter(|ns| !inherited.contains(&(ns.name(), ns.uri())))
        .map(|ns| match ns.name() {
            Some(prefix) => (format!("xmlns:{prefix}"), ns.uri().to_string()),
            None => ("xmlns".to_string(), ns.uri().to_string()),
        })
        .collect()
}

fn qualified_tag(node: roxmltree::Node<'_, '_>) -> String {
    let tag = node.tag_name();
    qualify(node, tag.namespace(), tag.name())
}

fn qualify(node: roxmltree::Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}
