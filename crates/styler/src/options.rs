use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Option bag for batched styling and hover registration.
///
/// Every field is optional; only present and truthy values (non-empty
/// strings, `true`) take effect. The serialized names are the ones the map
/// scripts already use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationStyle {
    /// Shape `fill`.
    #[serde(rename = "corFundo", default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Shape `stroke`.
    #[serde(rename = "corBorda", default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Shape `class`.
    #[serde(rename = "tracadoCss", default, skip_serializing_if = "Option::is_none")]
    pub shape_class: Option<String>,
    /// Label text `fill` and `stroke`.
    #[serde(
        rename = "nomeCor",
        alias = "corNome",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub label_color: Option<String>,
    /// Label `font-weight: bold`.
    #[serde(
        rename = "nomeNegrito",
        alias = "negrito",
        default,
        deserialize_with = "truthy_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub bold: Option<bool>,
    /// Label `class`.
    #[serde(rename = "nomeCss", default, skip_serializing_if = "Option::is_none")]
    pub label_class: Option<String>,
}

impl LocationStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }

    pub fn with_stroke(mut self, color: impl Into<String>) -> Self {
        self.stroke = Some(color.into());
        self
    }

    pub fn with_shape_class(mut self, class: impl Into<String>) -> Self {
        self.shape_class = Some(class.into());
        self
    }

    pub fn with_label_color(mut self, color: impl Into<String>) -> Self {
        self.label_color = Some(color.into());
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn with_label_class(mut self, class: impl Into<String>) -> Self {
        self.label_class = Some(class.into());
        self
    }

    pub fn fill(&self) -> Option<&str> {
        truthy(&self.fill)
    }

    pub fn stroke(&self) -> Option<&str> {
        truthy(&self.stroke)
    }

    pub fn shape_class(&self) -> Option<&str> {
        truthy(&self.shape_class)
    }

    pub fn label_color(&self) -> Option<&str> {
        truthy(&self.label_color)
    }

    pub fn is_bold(&self) -> bool {
        self.bold == Some(true)
    }

    pub fn label_class(&self) -> Option<&str> {
        truthy(&self.label_class)
    }

    /// `true` if at least one option would take effect.
    pub fn has_any(&self) -> bool {
        self.fill().is_some()
            || self.stroke().is_some()
            || self.shape_class().is_some()
            || self.label_color().is_some()
            || self.is_bold()
            || self.label_class().is_some()
    }
}

fn truthy(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

/// Reads a flag the way a script would test it: `1`, `"sim"` and `{}` are
/// true; `0`, `""` and `null` are false.
fn truthy_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    }))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::LocationStyle;

    #[test]
    fn reads_script_option_names() {
        let style: LocationStyle = serde_json::from_str(
            r##"{"corFundo":"#bbdefb","corBorda":"#1565c0","corNome":"#212121","negrito":true}"##,
        )
        .unwrap();
        assert_eq!(
            style,
            LocationStyle::new()
                .with_fill("#bbdefb")
                .with_stroke("#1565c0")
                .with_label_color("#212121")
                .with_bold(true)
        );
    }

    #[test]
    fn bold_flag_accepts_script_truthiness() {
        let bold = |json: &str| serde_json::from_str::<LocationStyle>(json).unwrap().is_bold();
        assert!(bold(r#"{"negrito":1}"#));
        assert!(bold(r#"{"nomeNegrito":"sim"}"#));
        assert!(!bold(r#"{"negrito":0}"#));
        assert!(!bold(r#"{"negrito":""}"#));
        assert!(!bold(r#"{"negrito":null}"#));

        let style: LocationStyle =
            serde_json::from_str(r##"{"corFundo":"#fff","negrito":1}"##).unwrap();
        assert_eq!(style.fill(), Some("#fff"));
    }

    #[test]
    fn falsy_options_do_not_count() {
        let style = LocationStyle::new().with_fill("").with_bold(false);
        assert_eq!(style.fill(), None);
        assert!(!style.is_bold());
        assert!(!style.has_any());
        assert!(!LocationStyle::default().has_any());
        assert!(LocationStyle::new().with_label_class("x").has_any());
    }

    #[test]
    fn serializes_only_present_fields() {
        let style = LocationStyle::new().with_fill("#fff").with_label_class("destaque");
        let json = serde_json::to_string(&style).unwrap();
        assert_eq!(json, r##"{"corFundo":"#fff","nomeCss":"destaque"}"##);
    }
}
