use serde::{Deserialize, Serialize};

/// Where the map keeps its facets.
///
/// Shapes are every `shape_tag` descendant of the `shapes` container; labels
/// are the element children of the `labels` container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapLayout {
    pub shapes: String,
    pub labels: String,
    pub shape_tag: String,
}

impl Default for MapLayout {
    fn default() -> Self {
        Self {
            shapes: "tracados".to_string(),
            labels: "nomes".to_string(),
            shape_tag: "path".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MapLayout;

    #[test]
    fn partial_json_keeps_defaults() {
        let layout: MapLayout = serde_json::from_str(r#"{"labels":"names"}"#).unwrap();
        assert_eq!(layout.shapes, "tracados");
        assert_eq!(layout.labels, "names");
        assert_eq!(layout.shape_tag, "path");
    }
}
