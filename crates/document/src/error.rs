#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The input is not well-formed XML.
    Xml(String),
    /// The document root is not an `<svg>` element.
    NotSvg(String),
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::Xml(msg) => write!(f, "invalid svg xml: {msg}"),
            DocumentError::NotSvg(tag) => write!(f, "root element is <{tag}>, expected <svg>"),
        }
    }
}

impl std::error::Error for DocumentError {}
