use std::collections::{HashMap, HashSet};

use document::MapDocument;
use tracing::{debug, error, warn};

use crate::attrs::{
    CLASS, DISPLAY, DISPLAY_NONE, FILL, FONT_WEIGHT, ID, POINTER_EVENTS, STROKE, TEXT_TAG,
    font_weight,
};
use crate::error::StylerError;
use crate::facets::{FacetKind, Keyed, LabelFacet, Orphan};
use crate::hover::{HoverBinding, HoverPlan};
use crate::layout::MapLayout;
use crate::options::LocationStyle;

/// Fill used by [`MapStyler::init_with_hover`] when no color is given.
pub const DEFAULT_HOVER_FILL: &str = "#fff59d";

/// Styles the Locations of one SVG map.
///
/// Owns the document it was initialised with. Every styling operation fails
/// silently: an empty key, an empty value or an unknown Location leaves the
/// document untouched.
pub struct MapStyler<D: MapDocument> {
    document: D,
    root: D::Node,
    layout: MapLayout,
    shapes: Vec<Keyed<D::Node>>,
    labels: Vec<Keyed<LabelFacet<D::Node>>>,
    orphans: Vec<Orphan>,
    hover: HashMap<String, HoverBinding<D>>,
}

impl<D: MapDocument + 'static> MapStyler<D> {
    pub fn init(document: D) -> Result<Self, StylerError> {
        Self::init_with_layout(document, MapLayout::default())
    }

    /// Indexes shapes and labels under the containers named by `layout`.
    ///
    /// Labels get `pointer-events: none` so they never steal the hover from
    /// the shape underneath. Facets without a counterpart are dropped from
    /// the index and reported by [`MapStyler::orphans`].
    pub fn init_with_layout(mut document: D, layout: MapLayout) -> Result<Self, StylerError> {
        let Some(root) = document.root() else {
            error!("map styler init: svg root element not provided");
            return Err(StylerError::MissingRoot);
        };
        let shapes_container = find_container(&document, &layout.shapes)?;
        let labels_container = find_container(&document, &layout.labels)?;

        let shape_nodes = document.descendants_by_tag(&shapes_container, &layout.shape_tag);
        let label_nodes = document.child_elements(&labels_container);

        for label in &label_nodes {
            document.set_style_property(label, POINTER_EVENTS, "none");
        }

        let mut shapes: Vec<Keyed<D::Node>> = shape_nodes
            .into_iter()
            .filter_map(|node| {
                let key = element_key(&document, &node)?;
                Some(Keyed { key, facet: node })
            })
            .collect();
        let mut labels: Vec<Keyed<LabelFacet<D::Node>>> = label_nodes
            .into_iter()
            .filter_map(|node| {
                let key = element_key(&document, &node)?;
                let facet = resolve_label(&document, node);
                Some(Keyed { key, facet })
            })
            .collect();

        let shape_keys: HashSet<String> = shapes.iter().map(|s| s.key.clone()).collect();
        let label_keys: HashSet<String> = labels.iter().map(|l| l.key.clone()).collect();

        let mut orphans = Vec::new();
        for s in shapes.iter().filter(|s| !label_keys.contains(&s.key)) {
            warn!(key = %s.key, "shape has no matching label; ignoring");
            orphans.push(Orphan {
                key: s.key.clone(),
                kind: FacetKind::Shape,
            });
        }
        for l in labels.iter().filter(|l| !shape_keys.contains(&l.key)) {
            warn!(key = %l.key, "label has no matching shape; ignoring");
            orphans.push(Orphan {
                key: l.key.clone(),
                kind: FacetKind::Label,
            });
        }
        shapes.retain(|s| label_keys.contains(&s.key));
        labels.retain(|l| shape_keys.contains(&l.key));

        debug!(
            shapes = shapes.len(),
            labels = labels.len(),
            orphans = orphans.len(),
            "indexed svg map"
        );

        Ok(Self {
            document,
            root,
            layout,
            shapes,
            labels,
            orphans,
            hover: HashMap::new(),
        })
    }

    /// Initialises and installs a fill-only hover on every Location.
    ///
    /// `None` or an empty color falls back to [`DEFAULT_HOVER_FILL`].
    pub fn init_with_hover(document: D, color: Option<&str>) -> Result<Self, StylerError> {
        let mut styler = Self::init(document)?;
        let color = color
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_HOVER_FILL);
        styler.set_all_locations_hover(&LocationStyle::new().with_fill(color));
        Ok(styler)
    }

    // ---- lookup ---------------------------------------------------------

    pub fn shape(&self, id: &str) -> Option<&D::Node> {
        find_shape(&self.shapes, id)
    }

    pub fn label(&self, id: &str) -> Option<&LabelFacet<D::Node>> {
        find_label(&self.labels, id)
    }

    /// Location keys in shape collection order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.shapes.iter().map(|s| s.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn orphans(&self) -> &[Orphan] {
        &self.orphans
    }

    pub fn root(&self) -> &D::Node {
        &self.root
    }

    pub fn layout(&self) -> &MapLayout {
        &self.layout
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    // ---- shape attributes -----------------------------------------------

    pub fn shape_fill(&self, id: &str) -> Option<String> {
        self.shape_attribute(id, FILL)
    }

    pub fn set_shape_fill(&mut self, id: &str, color: &str) {
        self.set_shape_attribute(id, FILL, color);
    }

    pub fn shape_stroke(&self, id: &str) -> Option<String> {
        self.shape_attribute(id, STROKE)
    }

    pub fn set_shape_stroke(&mut self, id: &str, color: &str) {
        self.set_shape_attribute(id, STROKE, color);
    }

    pub fn shape_class(&self, id: &str) -> Option<String> {
        self.shape_attribute(id, CLASS)
    }

    /// Replaces the shape's `class` attribute.
    pub fn set_shape_class(&mut self, id: &str, class: &str) {
        self.set_shape_attribute(id, CLASS, class);
    }

    /// Writes whichever of `fill` / `stroke` is given.
    pub fn set_shape(&mut self, id: &str, fill: Option<&str>, stroke: Option<&str>) {
        if let Some(fill) = fill {
            self.set_shape_fill(id, fill);
        }
        if let Some(stroke) = stroke {
            self.set_shape_stroke(id, stroke);
        }
    }

    pub fn is_shape_visible(&self, id: &str) -> Option<bool> {
        let shape = find_shape(&self.shapes, id)?;
        Some(is_displayed(&self.document, shape))
    }

    pub fn show_shape(&mut self, id: &str) {
        if let Some(shape) = find_shape(&self.shapes, id) {
            set_displayed(&mut self.document, shape, true);
        }
    }

    pub fn hide_shape(&mut self, id: &str) {
        if let Some(shape) = find_shape(&self.shapes, id) {
            set_displayed(&mut self.document, shape, false);
        }
    }

    fn shape_attribute(&self, id: &str, name: &str) -> Option<String> {
        let shape = find_shape(&self.shapes, id)?;
        self.document.attribute(shape, name)
    }

    fn set_shape_attribute(&mut self, id: &str, name: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        if let Some(shape) = find_shape(&self.shapes, id) {
            self.document.set_attribute(shape, name, value);
        }
    }

    // ---- label attributes -----------------------------------------------

    /// `fill` of the label's first text line.
    pub fn label_color(&self, id: &str) -> Option<String> {
        let text = find_label(&self.labels, id)?.first_text()?;
        self.document.attribute(text, FILL)
    }

    /// Sets `fill` and `stroke` on every text line of the label.
    pub fn set_label_color(&mut self, id: &str, color: &str) {
        if color.is_empty() {
            return;
        }
        if let Some(label) = find_label(&self.labels, id) {
            paint_label(&mut self.document, label, color);
        }
    }

    /// Whether the label's first text line is bold. `None` if the Location
    /// is unknown.
    pub fn is_label_bold(&self, id: &str) -> Option<bool> {
        let label = find_label(&self.labels, id)?;
        let bold = label
            .first_text()
            .and_then(|t| self.document.attribute(t, FONT_WEIGHT))
            .is_some_and(|w| w == font_weight(true));
        Some(bold)
    }

    pub fn set_label_bold(&mut self, id: &str, bold: bool) {
        if let Some(label) = find_label(&self.labels, id) {
            embolden_label(&mut self.document, label, bold);
        }
    }

    pub fn label_class(&self, id: &str) -> Option<String> {
        let label = find_label(&self.labels, id)?;
        self.document.attribute(label.element(), CLASS)
    }

    /// Replaces the `class` of the label element (the group for multi-line
    /// labels).
    pub fn set_label_class(&mut self, id: &str, class: &str) {
        if class.is_empty() {
            return;
        }
        if let Some(label) = find_label(&self.labels, id) {
            self.document.set_attribute(label.element(), CLASS, class);
        }
    }

    /// Color (when given) and weight in one call.
    pub fn set_label(&mut self, id: &str, color: Option<&str>, bold: bool) {
        if let Some(color) = color {
            self.set_label_color(id, color);
        }
        self.set_label_bold(id, bold);
    }

    pub fn is_label_visible(&self, id: &str) -> Option<bool> {
        let label = find_label(&self.labels, id)?;
        Some(is_displayed(&self.document, label.element()))
    }

    pub fn show_label(&mut self, id: &str) {
        if let Some(label) = find_label(&self.labels, id) {
            set_displayed(&mut self.document, label.element(), true);
        }
    }

    pub fn hide_label(&mut self, id: &str) {
        if let Some(label) = find_label(&self.labels, id) {
            set_displayed(&mut self.document, label.element(), false);
        }
    }

    // ---- bulk -----------------------------------------------------------

    pub fn set_all_shapes(&mut self, fill: Option<&str>, stroke: Option<&str>) {
        let fill = fill.filter(|v| !v.is_empty());
        let stroke = stroke.filter(|v| !v.is_empty());
        for s in &self.shapes {
            if let Some(fill) = fill {
                self.document.set_attribute(&s.facet, FILL, fill);
            }
            if let Some(stroke) = stroke {
                self.document.set_attribute(&s.facet, STROKE, stroke);
            }
        }
    }

    pub fn set_all_shape_fills(&mut self, color: &str) {
        self.set_all_shapes(Some(color), None);
    }

    pub fn set_all_shape_strokes(&mut self, color: &str) {
        self.set_all_shapes(None, Some(color));
    }

    pub fn set_all_shape_classes(&mut self, class: &str) {
        if class.is_empty() {
            return;
        }
        for s in &self.shapes {
            self.document.set_attribute(&s.facet, CLASS, class);
        }
    }

    pub fn show_all_shapes(&mut self) {
        for s in &self.shapes {
            set_displayed(&mut self.document, &s.facet, true);
        }
    }

    pub fn hide_all_shapes(&mut self) {
        for s in &self.shapes {
            set_displayed(&mut self.document, &s.facet, false);
        }
    }

    pub fn set_all_labels(&mut self, color: Option<&str>, bold: bool) {
        let color = color.filter(|v| !v.is_empty());
        for l in &self.labels {
            if let Some(color) = color {
                paint_label(&mut self.document, &l.facet, color);
            }
            embolden_label(&mut self.document, &l.facet, bold);
        }
    }

    pub fn set_all_label_colors(&mut self, color: &str) {
        if color.is_empty() {
            return;
        }
        for l in &self.labels {
            paint_label(&mut self.document, &l.facet, color);
        }
    }

    pub fn set_all_labels_bold(&mut self, bold: bool) {
        for l in &self.labels {
            embolden_label(&mut self.document, &l.facet, bold);
        }
    }

    pub fn set_all_label_classes(&mut self, class: &str) {
        if class.is_empty() {
            return;
        }
        for l in &self.labels {
            self.document.set_attribute(l.facet.element(), CLASS, class);
        }
    }

    pub fn show_all_labels(&mut self) {
        for l in &self.labels {
            set_displayed(&mut self.document, l.facet.element(), true);
        }
    }

    pub fn hide_all_labels(&mut self) {
        for l in &self.labels {
            set_displayed(&mut self.document, l.facet.element(), false);
        }
    }

    // ---- batched --------------------------------------------------------

    /// Applies every present and truthy option; the rest stays as it is.
    pub fn set_location(&mut self, id: &str, style: &LocationStyle) {
        if let Some(color) = style.fill() {
            self.set_shape_fill(id, color);
        }
        if let Some(color) = style.stroke() {
            self.set_shape_stroke(id, color);
        }
        if let Some(class) = style.shape_class() {
            self.set_shape_class(id, class);
        }
        if let Some(color) = style.label_color() {
            self.set_label_color(id, color);
        }
        if style.is_bold() {
            self.set_label_bold(id, true);
        }
        if let Some(class) = style.label_class() {
            self.set_label_class(id, class);
        }
    }

    pub fn set_all_locations(&mut self, style: &LocationStyle) {
        for key in self.owned_keys() {
            self.set_location(&key, style);
        }
    }

    // ---- hover ----------------------------------------------------------

    /// Installs the hover look for one Location, replacing any previous
    /// binding for the same key.
    pub fn set_location_hover(&mut self, id: &str, style: &LocationStyle) {
        let (Some(shape), Some(label)) = (find_shape(&self.shapes, id), find_label(&self.labels, id))
        else {
            return;
        };
        if !style.has_any() {
            return;
        }
        let plan = HoverPlan::build(shape, label, style);
        let target = shape.clone();

        if let Some(previous) = self.hover.remove(id) {
            debug!(key = id, "replacing hover binding");
            previous.uninstall(&mut self.document);
        }
        let binding = HoverBinding::install(&mut self.document, target, plan);
        self.hover.insert(id.to_string(), binding);
    }

    pub fn set_all_locations_hover(&mut self, style: &LocationStyle) {
        for key in self.owned_keys() {
            self.set_location_hover(&key, style);
        }
    }

    pub fn hover_binding(&self, id: &str) -> Option<&HoverBinding<D>> {
        self.hover.get(id)
    }

    /// Removes the Location's hover listeners. Returns `false` if none were
    /// installed.
    pub fn clear_location_hover(&mut self, id: &str) -> bool {
        match self.hover.remove(id) {
            Some(binding) => {
                binding.uninstall(&mut self.document);
                true
            }
            None => false,
        }
    }

    pub fn clear_all_hover(&mut self) {
        for (_, binding) in self.hover.drain() {
            binding.uninstall(&mut self.document);
        }
    }

    fn owned_keys(&self) -> Vec<String> {
        self.shapes.iter().map(|s| s.key.clone()).collect()
    }
}

fn find_container<D: MapDocument>(document: &D, id: &str) -> Result<D::Node, StylerError> {
    document.element_by_id(id).ok_or_else(|| {
        error!(container = id, "map styler init: container not found");
        StylerError::MissingContainer(id.to_string())
    })
}

fn element_key<D: MapDocument>(document: &D, node: &D::Node) -> Option<String> {
    document.attribute(node, ID).filter(|k| !k.is_empty())
}

fn resolve_label<D: MapDocument>(document: &D, node: D::Node) -> LabelFacet<D::Node> {
    if document.tag_name(&node) == TEXT_TAG {
        return LabelFacet::Single(node);
    }
    let texts = document.descendants_by_tag(&node, TEXT_TAG);
    LabelFacet::Group { group: node, texts }
}

// Keys are unique in a well-formed map; on duplicates the last element wins,
// as a full scan that keeps overwriting its match would.
fn find_shape<'a, N>(shapes: &'a [Keyed<N>], id: &str) -> Option<&'a N> {
    if id.is_empty() {
        return None;
    }
    shapes.iter().rev().find(|s| s.key == id).map(|s| &s.facet)
}

fn find_label<'a, N>(labels: &'a [Keyed<LabelFacet<N>>], id: &str) -> Option<&'a LabelFacet<N>> {
    if id.is_empty() {
        return None;
    }
    labels.iter().rev().find(|l| l.key == id).map(|l| &l.facet)
}

/// Runs `f` once per text line of `label`.
fn for_each_text<N>(label: &LabelFacet<N>, mut f: impl FnMut(&N)) {
    for text in label.text_nodes() {
        f(text);
    }
}

fn paint_label<D: MapDocument>(document: &mut D, label: &LabelFacet<D::Node>, color: &str) {
    for_each_text(label, |text| {
        document.set_attribute(text, FILL, color);
        document.set_attribute(text, STROKE, color);
    });
}

fn embolden_label<D: MapDocument>(document: &mut D, label: &LabelFacet<D::Node>, bold: bool) {
    for_each_text(label, |text| {
        document.set_attribute(text, FONT_WEIGHT, font_weight(bold));
    });
}

fn is_displayed<D: MapDocument>(document: &D, node: &D::Node) -> bool {
    document.style_property(node, DISPLAY).as_deref() != Some(DISPLAY_NONE)
}

fn set_displayed<D: MapDocument>(document: &mut D, node: &D::Node, visible: bool) {
    let value = if visible { "" } else { DISPLAY_NONE };
    document.set_style_property(node, DISPLAY, value);
}
