use foundation::handles::Handle;

/// Index of a node inside an [`SvgDocument`](crate::SvgDocument).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub Handle);

impl NodeId {
    pub fn index(&self) -> u32 {
        self.0.index()
    }
}

/// A single attribute, stored with its qualified name (`xlink:href`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Qualified tag name as written in the source (`svg`, `inkscape:grid`).
    pub name: String,
    pub attrs: Vec<Attr>,
}

impl ElementData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    /// Tag name without its namespace prefix.
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Overwrites an existing attribute in place or appends a new one.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attrs.push(Attr::new(name, value)),
        }
    }

    /// Returns `true` if the attribute was present.
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|a| a.name != name);
        self.attrs.len() != before
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Element(ElementData),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub data: NodeData,
}

impl Node {
    pub fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
        }
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ElementData;

    #[test]
    fn local_name_strips_prefix() {
        assert_eq!(ElementData::new("inkscape:grid").local_name(), "grid");
        assert_eq!(ElementData::new("path").local_name(), "path");
    }

    #[test]
    fn set_attribute_overwrites_in_place() {
        let mut e = ElementData::new("path");
        e.set_attribute("id", "a");
        e.set_attribute("fill", "red");
        e.set_attribute("id", "b");
        assert_eq!(e.attrs.len(), 2);
        assert_eq!(e.attrs[0].value, "b");
        assert!(e.remove_attribute("fill"));
        assert!(!e.remove_attribute("fill"));
        assert_eq!(e.attribute("fill"), None);
    }
}
