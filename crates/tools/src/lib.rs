use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use document::{PointerEvent, SvgDocument};
use styler::{FacetKind, MapLayout, MapStyler, StyleSheet};
use tracing::info;

/// Container ids given on the command line; each one overrides the layout it
/// is resolved against.
#[derive(Debug, Clone, Default)]
pub struct LayoutOverride {
    pub shapes: Option<String>,
    pub labels: Option<String>,
}

impl LayoutOverride {
    pub fn resolve(&self, mut base: MapLayout) -> MapLayout {
        if let Some(shapes) = &self.shapes {
            base.shapes = shapes.clone();
        }
        if let Some(labels) = &self.labels {
            base.labels = labels.clone();
        }
        base
    }
}

pub fn read_svg(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

pub fn read_sheet(path: &Path) -> Result<StyleSheet> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    StyleSheet::from_json_str(&text).with_context(|| format!("parsing {}", path.display()))
}

pub fn load_map(svg: &str, layout: MapLayout) -> Result<MapStyler<SvgDocument>> {
    let document = SvgDocument::parse(svg)?;
    Ok(MapStyler::init_with_layout(document, layout)?)
}

/// One Location key per line, in shape order.
pub fn ids_report(map: &MapStyler<SvgDocument>) -> String {
    let mut out = String::new();
    for key in map.keys() {
        let _ = writeln!(out, "{key}");
    }
    out
}

pub fn inspect_report(map: &MapStyler<SvgDocument>) -> String {
    fn or_dash(value: Option<String>) -> String {
        value.unwrap_or_else(|| "-".to_string())
    }
    fn shown(visible: Option<bool>) -> &'static str {
        if visible.unwrap_or(true) { "shown" } else { "hidden" }
    }

    let mut out = String::new();
    let _ = writeln!(out, "id\tfill\tstroke\tlabel\tbold\tshape\tname");
    for key in map.keys() {
        let _ = writeln!(
            out,
            "{key}\t{}\t{}\t{}\t{}\t{}\t{}",
            or_dash(map.shape_fill(key)),
            or_dash(map.shape_stroke(key)),
            or_dash(map.label_color(key)),
            if map.is_label_bold(key).unwrap_or(false) { "yes" } else { "no" },
            shown(map.is_shape_visible(key)),
            shown(map.is_label_visible(key)),
        );
    }
    for orphan in map.orphans() {
        let missing = match orphan.kind {
            FacetKind::Shape => "label",
            FacetKind::Label => "shape",
        };
        let _ = writeln!(out, "orphan {} (no {missing})", orphan.key);
    }
    out
}

/// Applies `sheet` to the map and returns the styled SVG text. With `hover`,
/// that Location is rendered as if the pointer were over it.
pub fn style_svg(
    svg: &str,
    sheet: &StyleSheet,
    layout: &LayoutOverride,
    hover: Option<&str>,
) -> Result<String> {
    let mut map = load_map(svg, layout.resolve(sheet.layout()))?;
    sheet.apply(&mut map);

    if let Some(key) = hover {
        let Some(&shape) = map.shape(key) else {
            bail!("no location with id {key:?}");
        };
        let fired = map.document_mut().dispatch(shape, PointerEvent::Enter);
        info!(key, fired, "rendered hover state");
    }
    Ok(map.into_document().to_svg_string())
}
