#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StylerError {
    /// No root element to bind to.
    MissingRoot,
    /// A facet container id was not found under the root.
    MissingContainer(String),
}

impl std::fmt::Display for StylerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StylerError::MissingRoot => write!(f, "svg root element not provided"),
            StylerError::MissingContainer(id) => write!(f, "container #{id} not found in svg"),
        }
    }
}

impl std::error::Error for StylerError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    Parse(String),
}

impl std::fmt::Display for SheetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetError::Parse(msg) => write!(f, "invalid stylesheet: {msg}"),
        }
    }
}

impl std::error::Error for SheetError {}
