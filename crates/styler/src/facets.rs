/// A Location's label, resolved once when the map is indexed.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelFacet<N> {
    /// The label element is itself a `text` element.
    Single(N),
    /// A wrapper (usually `g`) around one or more `text` lines.
    Group { group: N, texts: Vec<N> },
}

impl<N> LabelFacet<N> {
    /// The element carrying display, pointer-events and class.
    pub fn element(&self) -> &N {
        match self {
            LabelFacet::Single(text) => text,
            LabelFacet::Group { group, .. } => group,
        }
    }

    /// The text nodes that carry color and weight.
    pub fn text_nodes(&self) -> &[N] {
        match self {
            LabelFacet::Single(text) => std::slice::from_ref(text),
            LabelFacet::Group { texts, .. } => texts,
        }
    }

    pub fn first_text(&self) -> Option<&N> {
        self.text_nodes().first()
    }

    pub fn is_group(&self) -> bool {
        matches!(self, LabelFacet::Group { .. })
    }
}

/// A facet paired with its Location key.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyed<T> {
    pub key: String,
    pub facet: T,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FacetKind {
    Shape,
    Label,
}

/// A facet whose counterpart is missing; it is left out of the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orphan {
    pub key: String,
    pub kind: FacetKind,
}

#[cfg(test)]
mod tests {
    use super::LabelFacet;

    #[test]
    fn single_dispatches_to_itself() {
        let label = LabelFacet::Single(7);
        assert_eq!(label.element(), &7);
        assert_eq!(label.text_nodes(), &[7]);
        assert!(!label.is_group());
    }

    #[test]
    fn group_dispatches_to_each_line() {
        let label = LabelFacet::Group {
            group: 1,
            texts: vec![2, 3],
        };
        assert_eq!(label.element(), &1);
        assert_eq!(label.text_nodes(), &[2, 3]);
        assert_eq!(label.first_text(), Some(&2));

        let empty: LabelFacet<u8> = LabelFacet::Group {
            group: 1,
            texts: Vec::new(),
        };
        assert_eq!(empty.first_text(), None);
    }
}
