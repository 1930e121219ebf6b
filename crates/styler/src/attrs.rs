//! How styling state is encoded on the DOM.

pub const FILL: &str = "fill";
pub const STROKE: &str = "stroke";
pub const CLASS: &str = "class";
pub const FONT_WEIGHT: &str = "font-weight";
pub const ID: &str = "id";

pub const BOLD: &str = "bold";

pub const DISPLAY: &str = "display";
pub const DISPLAY_NONE: &str = "none";
pub const POINTER_EVENTS: &str = "pointer-events";

pub const TEXT_TAG: &str = "text";

/// Prefix of the attributes that hold pre-hover values.
pub const SHADOW_PREFIX: &str = "data-mapasvg-";

/// Attribute holding the pre-hover value of `attribute`.
pub fn shadow_attribute(attribute: &str) -> String {
    format!("{SHADOW_PREFIX}{attribute}")
}

/// `font-weight` value for a bold flag.
pub fn font_weight(bold: bool) -> &'static str {
    if bold { BOLD } else { "" }
}
