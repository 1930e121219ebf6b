use std::rc::Rc;

use document::{Handler, MapDocument, PointerEvent};

use crate::attrs::{BOLD, CLASS, FILL, FONT_WEIGHT, STROKE, shadow_attribute};
use crate::facets::LabelFacet;
use crate::options::LocationStyle;

/// One attribute overridden while the pointer is over a Location.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSwap<N> {
    pub node: N,
    pub attribute: &'static str,
    pub value: String,
}

impl<N> AttributeSwap<N> {
    pub fn new(node: N, attribute: &'static str, value: impl Into<String>) -> Self {
        Self {
            node,
            attribute,
            value: value.into(),
        }
    }
}

/// The attribute swaps a hover binding performs, fixed at registration.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverPlan<N> {
    swaps: Vec<AttributeSwap<N>>,
}

impl<N: Clone> HoverPlan<N> {
    pub fn build(shape: &N, label: &LabelFacet<N>, style: &LocationStyle) -> Self {
        let mut swaps = Vec::new();
        if let Some(color) = style.fill() {
            swaps.push(AttributeSwap::new(shape.clone(), FILL, color));
        }
        if let Some(color) = style.stroke() {
            swaps.push(AttributeSwap::new(shape.clone(), STROKE, color));
        }
        if let Some(class) = style.shape_class() {
            swaps.push(AttributeSwap::new(shape.clone(), CLASS, class));
        }
        if let Some(color) = style.label_color() {
            for text in label.text_nodes() {
                swaps.push(AttributeSwap::new(text.clone(), FILL, color));
                swaps.push(AttributeSwap::new(text.clone(), STROKE, color));
            }
        }
        if style.is_bold() {
            for text in label.text_nodes() {
                swaps.push(AttributeSwap::new(text.clone(), FONT_WEIGHT, BOLD));
            }
        }
        if let Some(class) = style.label_class() {
            swaps.push(AttributeSwap::new(label.element().clone(), CLASS, class));
        }
        Self { swaps }
    }
}

impl<N> HoverPlan<N> {
    pub fn swaps(&self) -> &[AttributeSwap<N>] {
        &self.swaps
    }

    pub fn is_empty(&self) -> bool {
        self.swaps.is_empty()
    }

    /// Saves each current value into its shadow attribute, then writes the
    /// hover value. An unset attribute is saved as an empty shadow.
    ///
    /// Entering twice without leaving saves the hover value itself as the
    /// original; the following leave then keeps the hover look.
    pub fn enter<D: MapDocument<Node = N>>(&self, doc: &mut D) {
        for swap in &self.swaps {
            let shadow = shadow_attribute(swap.attribute);
            let current = doc.attribute(&swap.node, swap.attribute).unwrap_or_default();
            doc.set_attribute(&swap.node, &shadow, &current);
            doc.set_attribute(&swap.node, swap.attribute, &swap.value);
        }
    }

    /// Restores every swapped attribute from its shadow. An empty shadow
    /// removes the attribute; a missing one (no enter has saved it) leaves
    /// the attribute alone.
    pub fn leave<D: MapDocument<Node = N>>(&self, doc: &mut D) {
        for swap in &self.swaps {
            let shadow = shadow_attribute(swap.attribute);
            match doc.attribute(&swap.node, &shadow).as_deref() {
                Some("") => doc.remove_attribute(&swap.node, swap.attribute),
                Some(original) => doc.set_attribute(&swap.node, swap.attribute, original),
                None => {}
            }
        }
    }
}

/// An installed enter/leave listener pair for one Location.
pub struct HoverBinding<D: MapDocument> {
    target: D::Node,
    plan: Rc<HoverPlan<D::Node>>,
    enter: D::Listener,
    leave: D::Listener,
}

impl<D: MapDocument + 'static> HoverBinding<D> {
    /// Attaches the plan's enter and leave handlers to `target`.
    pub fn install(doc: &mut D, target: D::Node, plan: HoverPlan<D::Node>) -> Self {
        let plan = Rc::new(plan);

        let on_enter = Rc::clone(&plan);
        let enter_handler: Handler<D> = Rc::new(move |doc: &mut D| on_enter.enter(doc));
        let on_leave = Rc::clone(&plan);
        let leave_handler: Handler<D> = Rc::new(move |doc: &mut D| on_leave.leave(doc));

        let enter = doc.add_listener(&target, PointerEvent::Enter, enter_handler);
        let leave = doc.add_listener(&target, PointerEvent::Leave, leave_handler);
        Self {
            target,
            plan,
            enter,
            leave,
        }
    }

    /// Detaches exactly the two listeners this binding installed.
    pub fn uninstall(self, doc: &mut D) {
        doc.remove_listener(&self.target, PointerEvent::Enter, self.enter);
        doc.remove_listener(&self.target, PointerEvent::Leave, self.leave);
    }
}

impl<D: MapDocument> HoverBinding<D> {
    pub fn target(&self) -> &D::Node {
        &self.target
    }

    pub fn plan(&self) -> &HoverPlan<D::Node> {
        &self.plan
    }
}

impl<D: MapDocument> std::fmt::Debug for HoverBinding<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoverBinding")
            .field("target", &self.target)
            .field("swaps", &self.plan.swaps().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use document::{PointerEvent, SvgDocument};

    use super::{HoverBinding, HoverPlan};
    use crate::facets::LabelFacet;
    use crate::options::LocationStyle;

    const SVG: &str = r##"<svg><path id="p" fill="#eee"/><g id="g"><text id="t1">a</text><text id="t2" fill="#000">b</text></g></svg>"##;

    fn parts(doc: &SvgDocument) -> (document::NodeId, LabelFacet<document::NodeId>) {
        let shape = doc.element_by_id("p").unwrap();
        let label = LabelFacet::Group {
            group: doc.element_by_id("g").unwrap(),
            texts: vec![doc.element_by_id("t1").unwrap(), doc.element_by_id("t2").unwrap()],
        };
        (shape, label)
    }

    #[test]
    fn plan_covers_every_text_line() {
        let doc = SvgDocument::parse(SVG).unwrap();
        let (shape, label) = parts(&doc);
        let style = LocationStyle::new()
            .with_fill("#ff0")
            .with_label_color("#00f")
            .with_bold(true);
        let plan = HoverPlan::build(&shape, &label, &style);
        // fill + (fill, stroke) x 2 lines + weight x 2 lines
        assert_eq!(plan.swaps().len(), 7);

        let empty = HoverPlan::build(&shape, &label, &LocationStyle::new().with_bold(false));
        assert!(empty.is_empty());
    }

    #[test]
    fn enter_then_leave_restores_and_removes_unset() {
        let mut doc = SvgDocument::parse(SVG).unwrap();
        let (shape, label) = parts(&doc);
        let t1 = label.text_nodes()[0];
        let plan = HoverPlan::build(
            &shape,
            &label,
            &LocationStyle::new().with_fill("#ff0").with_label_color("#00f"),
        );

        plan.enter(&mut doc);
        assert_eq!(doc.attribute(shape, "fill"), Some("#ff0"));
        assert_eq!(doc.attribute(shape, "data-mapasvg-fill"), Some("#eee"));
        assert_eq!(doc.attribute(t1, "fill"), Some("#00f"));
        assert_eq!(doc.attribute(t1, "data-mapasvg-fill"), Some(""));

        plan.leave(&mut doc);
        assert_eq!(doc.attribute(shape, "fill"), Some("#eee"));
        // t1 had no fill before hovering.
        assert_eq!(doc.attribute(t1, "fill"), None);
        assert_eq!(doc.attribute(t1, "stroke"), None);
    }

    #[test]
    fn leave_without_saved_value_keeps_attribute() {
        let mut doc = SvgDocument::parse(SVG).unwrap();
        let (shape, label) = parts(&doc);
        let plan = HoverPlan::build(&shape, &label, &LocationStyle::new().with_fill("#ff0"));
        plan.leave(&mut doc);
        assert_eq!(doc.attribute(shape, "fill"), Some("#eee"));
    }

    #[test]
    fn double_enter_loses_original_value() {
        let mut doc = SvgDocument::parse(SVG).unwrap();
        let (shape, label) = parts(&doc);
        let plan = HoverPlan::build(&shape, &label, &LocationStyle::new().with_fill("#ff0"));
        plan.enter(&mut doc);
        plan.enter(&mut doc);
        plan.leave(&mut doc);
        assert_eq!(doc.attribute(shape, "fill"), Some("#ff0"));
    }

    #[test]
    fn install_and_uninstall_listener_pair() {
        let mut doc = SvgDocument::parse(SVG).unwrap();
        let (shape, label) = parts(&doc);
        let plan = HoverPlan::build(&shape, &label, &LocationStyle::new().with_fill("#ff0"));
        let binding = HoverBinding::install(&mut doc, shape, plan);
        assert_eq!(doc.listener_count(shape, PointerEvent::Enter), 1);
        assert_eq!(doc.listener_count(shape, PointerEvent::Leave), 1);
        assert_eq!(binding.target(), &shape);

        doc.dispatch(shape, PointerEvent::Enter);
        assert_eq!(doc.attribute(shape, "fill"), Some("#ff0"));
        doc.dispatch(shape, PointerEvent::Leave);
        assert_eq!(doc.attribute(shape, "fill"), Some("#eee"));

        binding.uninstall(&mut doc);
        assert_eq!(doc.listener_count(shape, PointerEvent::Enter), 0);
        assert_eq!(doc.listener_count(shape, PointerEvent::Leave), 0);
    }
}
