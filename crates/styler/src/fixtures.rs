use document::SvgDocument;

/// Three shapes, two labels: "A" has a one-line label, "B" a two-line
/// group, "C" has no label and "D" has no shape.
pub const MAP: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <g id="tracados">
    <path id="A" d="M0 0h10v10z" fill="#eeeeee" stroke="#999999"/>
    <g>
      <path id="B" d="M10 0h10v10z" fill="#eeeeee" stroke="#999999"/>
    </g>
    <path id="C" d="M20 0h10v10z"/>
    <path d="M30 0h10v10z"/>
  </g>
  <g id="nomes">
    <text id="A" x="5" y="5" fill="#333333">Alfa</text>
    <g id="B">
      <text x="15" y="4">Beta</text>
      <text x="15" y="8">Norte</text>
    </g>
    <text id="D" x="45" y="5">Delta</text>
  </g>
</svg>"##;

pub fn map() -> SvgDocument {
    SvgDocument::parse(MAP).expect("fixture parses")
}
