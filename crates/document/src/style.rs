//! Inline `style="..."` declarations.
//!
//! Only the subset the map needs: ordered `property: value` pairs, later
//! declarations win, property names compare case-insensitively.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    entries: Vec<(String, String)>,
}

impl StyleDeclaration {
    pub fn parse(text: &str) -> Self {
        let mut out = Self::default();
        for decl in text.split(';') {
            let Some((prop, value)) = decl.split_once(':') else {
                continue;
            };
            let prop = prop.trim();
            let value = value.trim();
            if prop.is_empty() {
                continue;
            }
            out.set_property(prop, value);
        }
        out
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(p, _)| *p == name)
            .map(|(_, v)| v.as_str())
    }

    /// Sets `name` to `value`. An empty value removes the property, the
    /// same way CSSOM `style.x = ''` does.
    pub fn set_property(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if value.is_empty() {
            self.entries.retain(|(p, _)| *p != name);
            return;
        }
        match self.entries.iter_mut().find(|(p, _)| *p == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((name, value.to_string())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl std::fmt::Display for StyleDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (prop, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{prop}: {value};")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::StyleDeclaration;

    #[test]
    fn parses_and_looks_up_properties() {
        let s = StyleDeclaration::parse("fill:#fff; Display : none;;stroke-width:2");
        assert_eq!(s.len(), 3);
        assert_eq!(s.property("display"), Some("none"));
        assert_eq!(s.property("FILL"), Some("#fff"));
        assert_eq!(s.property("opacity"), None);
    }

    #[test]
    fn later_declaration_wins() {
        let s = StyleDeclaration::parse("display: none; display: inline");
        assert_eq!(s.len(), 1);
        assert_eq!(s.property("display"), Some("inline"));
    }

    #[test]
    fn empty_value_removes_property() {
        let mut s = StyleDeclaration::parse("display: none; pointer-events: none");
        s.set_property("display", "");
        assert_eq!(s.to_string(), "pointer-events: none;");
        s.set_property("pointer-events", "");
        assert!(s.is_empty());
        assert_eq!(s.to_string(), "");
    }
}
