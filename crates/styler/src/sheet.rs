use std::collections::BTreeMap;

use document::MapDocument;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SheetError;
use crate::layout::MapLayout;
use crate::options::LocationStyle;
use crate::styler::MapStyler;

/// Per-Location overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationRule {
    pub style: Option<LocationStyle>,
    pub hover: Option<LocationStyle>,
    /// Hides both the shape and the label.
    pub hidden: Option<bool>,
    pub label_hidden: Option<bool>,
}

/// A whole-map styling recipe, read from JSON.
///
/// Applied in order: `all`, `allHover`, the hide-all switches, then each
/// entry of `locations` in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleSheet {
    pub layout: Option<MapLayout>,
    pub all: Option<LocationStyle>,
    pub all_hover: Option<LocationStyle>,
    pub hide_all_shapes: bool,
    pub hide_all_labels: bool,
    pub locations: BTreeMap<String, LocationRule>,
}

impl StyleSheet {
    pub fn from_json_str(text: &str) -> Result<Self, SheetError> {
        serde_json::from_str(text).map_err(|e| SheetError::Parse(e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String, SheetError> {
        serde_json::to_string_pretty(self).map_err(|e| SheetError::Parse(e.to_string()))
    }

    /// Layout to index the map with; the default one when unset.
    pub fn layout(&self) -> MapLayout {
        self.layout.clone().unwrap_or_default()
    }

    pub fn apply<D: MapDocument + 'static>(&self, styler: &mut MapStyler<D>) {
        if let Some(style) = &self.all {
            styler.set_all_locations(style);
        }
        if let Some(style) = &self.all_hover {
            styler.set_all_locations_hover(style);
        }
        if self.hide_all_shapes {
            styler.hide_all_shapes();
        }
        if self.hide_all_labels {
            styler.hide_all_labels();
        }

        for (key, rule) in &self.locations {
            if let Some(style) = &rule.style {
                styler.set_location(key, style);
            }
            if let Some(style) = &rule.hover {
                styler.set_location_hover(key, style);
            }
            match rule.hidden {
                Some(true) => {
                    styler.hide_shape(key);
                    styler.hide_label(key);
                }
                Some(false) => {
                    styler.show_shape(key);
                    styler.show_label(key);
                }
                None => {}
            }
            match rule.label_hidden {
                Some(true) => styler.hide_label(key),
                Some(false) => styler.show_label(key),
                None => {}
            }
        }
        debug!(locations = self.locations.len(), "applied stylesheet");
    }
}
