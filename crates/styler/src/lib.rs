pub mod attrs;
pub mod error;
pub mod facets;
pub mod hover;
pub mod layout;
pub mod options;
pub mod sheet;
pub mod styler;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::*;
pub use facets::{FacetKind, LabelFacet, Orphan};
pub use hover::{AttributeSwap, HoverBinding, HoverPlan};
pub use layout::MapLayout;
pub use options::LocationStyle;
pub use sheet::{LocationRule, StyleSheet};
pub use styler::{DEFAULT_HOVER_FILL, MapStyler};
