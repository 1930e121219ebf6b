use std::sync::atomic::{AtomicBool, Ordering};

use console_error_panic_hook::set_once;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use styler::{LocationStyle, MapStyler, StyleSheet};

mod dom;
pub use dom::{WebDocument, WebListener};

// Guard against double initialization during hot reload.
static INITIALIZED: AtomicBool = AtomicBool::new(false);

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    set_once();
    Ok(())
}

fn log_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

fn log_warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

/// Reads a JS option bag (`{ corFundo, corBorda, nomeCor, negrito, ... }`).
/// `undefined`/`null` read as an empty style; anything unparsable is `None`.
fn location_style(options: &JsValue) -> Option<LocationStyle> {
    if options.is_undefined() || options.is_null() {
        return Some(LocationStyle::default());
    }
    let json = js_sys::JSON::stringify(options).ok()?.as_string()?;
    match serde_json::from_str(&json) {
        Ok(style) => Some(style),
        Err(err) => {
            log_warn(&format!("mapaSvg: opções inválidas: {err}"));
            None
        }
    }
}

/// Styling handle over one `<svg>` map already present in the page.
#[wasm_bindgen]
pub struct MapaSvg {
    styler: MapStyler<WebDocument>,
}

#[wasm_bindgen]
impl MapaSvg {
    /// Indexes the map; returns `undefined` (and logs) when `svg` is missing
    /// or lacks the shape/label containers.
    #[wasm_bindgen(js_name = init)]
    pub fn init(svg: Option<Element>) -> Option<MapaSvg> {
        let Some(svg) = svg else {
            log_error("mapaSvg: elemento svg não encontrado");
            return None;
        };
        match MapStyler::init(WebDocument::new(Some(svg))) {
            Ok(styler) => Some(MapaSvg { styler }),
            Err(err) => {
                log_error(&format!("mapaSvg: {err}"));
                None
            }
        }
    }

    /// Like `init`, then highlights every Location with `corHover` (a light
    /// yellow when omitted).
    #[wasm_bindgen(js_name = initWithHover)]
    pub fn init_with_hover(svg: Option<Element>, cor_hover: Option<String>) -> Option<MapaSvg> {
        let Some(svg) = svg else {
            log_error("mapaSvg: elemento svg não encontrado");
            return None;
        };
        match MapStyler::init_with_hover(WebDocument::new(Some(svg)), cor_hover.as_deref()) {
            Ok(styler) => Some(MapaSvg { styler }),
            Err(err) => {
                log_error(&format!("mapaSvg: {err}"));
                None
            }
        }
    }

    #[wasm_bindgen(js_name = getIds)]
    pub fn ids(&self) -> js_sys::Array {
        self.styler.keys().map(JsValue::from_str).collect()
    }

    #[wasm_bindgen(js_name = getTracadoElem)]
    pub fn shape(&self, id: &str) -> Option<Element> {
        self.styler.shape(id).cloned()
    }

    #[wasm_bindgen(js_name = getNomeElem)]
    pub fn label(&self, id: &str) -> Option<Element> {
        self.styler.label(id).map(|facet| facet.element().clone())
    }

    #[wasm_bindgen(js_name = getCorFundo)]
    pub fn shape_fill(&self, id: &str) -> Option<String> {
        self.styler.shape_fill(id)
    }

    #[wasm_bindgen(js_name = setCorFundo)]
    pub fn set_shape_fill(&mut self, id: &str, cor: &str) {
        self.styler.set_shape_fill(id, cor);
    }

    #[wasm_bindgen(js_name = getCorBorda)]
    pub fn shape_stroke(&self, id: &str) -> Option<String> {
        self.styler.shape_stroke(id)
    }

    #[wasm_bindgen(js_name = setCorBorda)]
    pub fn set_shape_stroke(&mut self, id: &str, cor: &str) {
        self.styler.set_shape_stroke(id, cor);
    }

    #[wasm_bindgen(js_name = getTracadoCss)]
    pub fn shape_class(&self, id: &str) -> Option<String> {
        self.styler.shape_class(id)
    }

    #[wasm_bindgen(js_name = setTracadoCss)]
    pub fn set_shape_class(&mut self, id: &str, css: &str) {
        self.styler.set_shape_class(id, css);
    }

    #[wasm_bindgen(js_name = setTracado)]
    pub fn set_shape(&mut self, id: &str, cor_fundo: Option<String>, cor_borda: Option<String>) {
        self.styler.set_shape(id, cor_fundo.as_deref(), cor_borda.as_deref());
    }

    #[wasm_bindgen(js_name = showTracado)]
    pub fn show_shape(&mut self, id: &str) {
        self.styler.show_shape(id);
    }

    #[wasm_bindgen(js_name = hideTracado)]
    pub fn hide_shape(&mut self, id: &str) {
        self.styler.hide_shape(id);
    }

    #[wasm_bindgen(js_name = isTracadoVisivel)]
    pub fn is_shape_visible(&self, id: &str) -> Option<bool> {
        self.styler.is_shape_visible(id)
    }

    #[wasm_bindgen(js_name = getNomeCor)]
    pub fn label_color(&self, id: &str) -> Option<String> {
        self.styler.label_color(id)
    }

    #[wasm_bindgen(js_name = setNomeCor)]
    pub fn set_label_color(&mut self, id: &str, cor: &str) {
        self.styler.set_label_color(id, cor);
    }

    #[wasm_bindgen(js_name = isNomeNegrito)]
    pub fn is_label_bold(&self, id: &str) -> Option<bool> {
        self.styler.is_label_bold(id)
    }

    #[wasm_bindgen(js_name = setNomeNegrito)]
    pub fn set_label_bold(&mut self, id: &str, negrito: bool) {
        self.styler.set_label_bold(id, negrito);
    }

    #[wasm_bindgen(js_name = getNomeCss)]
    pub fn label_class(&self, id: &str) -> Option<String> {
        self.styler.label_class(id)
    }

    #[wasm_bindgen(js_name = setNomeCss)]
    pub fn set_label_class(&mut self, id: &str, css: &str) {
        self.styler.set_label_class(id, css);
    }

    #[wasm_bindgen(js_name = setNome)]
    pub fn set_label(&mut self, id: &str, cor: Option<String>, negrito: bool) {
        self.styler.set_label(id, cor.as_deref(), negrito);
    }

    #[wasm_bindgen(js_name = showNome)]
    pub fn show_label(&mut self, id: &str) {
        self.styler.show_label(id);
    }

    #[wasm_bindgen(js_name = hideNome)]
    pub fn hide_label(&mut self, id: &str) {
        self.styler.hide_label(id);
    }

    #[wasm_bindgen(js_name = isNomeVisivel)]
    pub fn is_label_visible(&self, id: &str) -> Option<bool> {
        self.styler.is_label_visible(id)
    }

    #[wasm_bindgen(js_name = setAllTracados)]
    pub fn set_all_shapes(&mut self, cor_fundo: Option<String>, cor_borda: Option<String>) {
        self.styler.set_all_shapes(cor_fundo.as_deref(), cor_borda.as_deref());
    }

    #[wasm_bindgen(js_name = setAllCorFundo)]
    pub fn set_all_shape_fills(&mut self, cor: &str) {
        self.styler.set_all_shape_fills(cor);
    }

    #[wasm_bindgen(js_name = setAllCorBorda)]
    pub fn set_all_shape_strokes(&mut self, cor: &str) {
        self.styler.set_all_shape_strokes(cor);
    }

    #[wasm_bindgen(js_name = setAllTracadoCss)]
    pub fn set_all_shape_classes(&mut self, css: &str) {
        self.styler.set_all_shape_classes(css);
    }

    #[wasm_bindgen(js_name = showAllTracados)]
    pub fn show_all_shapes(&mut self) {
        self.styler.show_all_shapes();
    }

    #[wasm_bindgen(js_name = hideAllTracados)]
    pub fn hide_all_shapes(&mut self) {
        self.styler.hide_all_shapes();
    }

    #[wasm_bindgen(js_name = setAllNomes)]
    pub fn set_all_labels(&mut self, cor: Option<String>, negrito: bool) {
        self.styler.set_all_labels(cor.as_deref(), negrito);
    }

    #[wasm_bindgen(js_name = setAllNomeCor)]
    pub fn set_all_label_colors(&mut self, cor: &str) {
        self.styler.set_all_label_colors(cor);
    }

    #[wasm_bindgen(js_name = setAllNomeNegrito)]
    pub fn set_all_labels_bold(&mut self, negrito: bool) {
        self.styler.set_all_labels_bold(negrito);
    }

    #[wasm_bindgen(js_name = setAllNomeCss)]
    pub fn set_all_label_classes(&mut self, css: &str) {
        self.styler.set_all_label_classes(css);
    }

    #[wasm_bindgen(js_name = showAllNomes)]
    pub fn show_all_labels(&mut self) {
        self.styler.show_all_labels();
    }

    #[wasm_bindgen(js_name = hideAllNomes)]
    pub fn hide_all_labels(&mut self) {
        self.styler.hide_all_labels();
    }

    #[wasm_bindgen(js_name = setLocalidade)]
    pub fn set_location(&mut self, id: &str, opcoes: JsValue) {
        if let Some(style) = location_style(&opcoes) {
            self.styler.set_location(id, &style);
        }
    }

    #[wasm_bindgen(js_name = setAllLocalidades)]
    pub fn set_all_locations(&mut self, opcoes: JsValue) {
        if let Some(style) = location_style(&opcoes) {
            self.styler.set_all_locations(&style);
        }
    }

    #[wasm_bindgen(js_name = setLocalidadeHover)]
    pub fn set_location_hover(&mut self, id: &str, opcoes: JsValue) {
        if let Some(style) = location_style(&opcoes) {
            self.styler.set_location_hover(id, &style);
        }
    }

    #[wasm_bindgen(js_name = setAllLocalidadesHover)]
    pub fn set_all_locations_hover(&mut self, opcoes: JsValue) {
        if let Some(style) = location_style(&opcoes) {
            self.styler.set_all_locations_hover(&style);
        }
    }

    #[wasm_bindgen(js_name = clearLocalidadeHover)]
    pub fn clear_location_hover(&mut self, id: &str) -> bool {
        self.styler.clear_location_hover(id)
    }

    #[wasm_bindgen(js_name = clearAllHover)]
    pub fn clear_all_hover(&mut self) {
        self.styler.clear_all_hover();
    }

    /// Applies a JSON stylesheet (same format as the `mapa style` CLI).
    /// The sheet's `layout` is ignored; the map is already indexed.
    #[wasm_bindgen(js_name = applyStyleSheet)]
    pub fn apply_style_sheet(&mut self, json: &str) -> Result<(), JsValue> {
        let sheet =
            StyleSheet::from_json_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        sheet.apply(&mut self.styler);
        Ok(())
    }
}
