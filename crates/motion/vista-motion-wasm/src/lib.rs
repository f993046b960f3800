mod dom;

use js_sys::Array;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use vista_motion_core::{
    ElementId, ElementSource, IntersectionEntry, MotionConfig, MotionController, Outputs,
};

#[wasm_bindgen]
pub struct VistaMotion {
    core: MotionController,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

pub use dom::{start, MotionHandle, ID_ATTR};

pub(crate) fn parse_config(config: JsValue) -> Result<MotionConfig, JsError> {
    if jsvalue_is_undefined_or_null(&config) {
        Ok(MotionConfig::default())
    } else {
        swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))
    }
}

fn to_js(out: &Outputs) -> Result<JsValue, JsError> {
    swb::to_value(out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
}

#[wasm_bindgen]
impl VistaMotion {
    /// Create a controller. Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new VistaMotion({ stagger_step_ms: 80, reveal_once: false })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<VistaMotion, JsError> {
        console_error_panic_hook::set_once();

        let core = MotionController::try_new(parse_config(config)?)
            .map_err(|e| JsError::new(&format!("config error: {e}")))?;
        Ok(VistaMotion { core })
    }

    /// Observer construction parameters: `[{ observer, options: { threshold, root_margin } }]`.
    #[wasm_bindgen]
    pub fn observers(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.core.observer_specs())
            .map_err(|e| JsError::new(&format!("observers error: {e}")))
    }

    /// Register an element. `source` is `{ dataset: {..}, text?: string }`
    /// where `dataset` is the element's DOM dataset. Returns Outputs JSON.
    #[wasm_bindgen]
    pub fn register(&mut self, id: u32, source: JsValue) -> Result<JsValue, JsError> {
        let source: ElementSource = if jsvalue_is_undefined_or_null(&source) {
            ElementSource::default()
        } else {
            swb::from_value(source)
                .map_err(|e| JsError::new(&format!("register parse error: {e}")))?
        };
        to_js(self.core.register(ElementId(id), &source))
    }

    /// Register the items of one stagger container, in document order.
    #[wasm_bindgen(js_name = register_stagger_group)]
    pub fn register_stagger_group(&mut self, ids: Vec<u32>) -> Result<JsValue, JsError> {
        let ids: Vec<ElementId> = ids.into_iter().map(ElementId).collect();
        to_js(self.core.register_stagger_group(&ids))
    }

    /// Feed observer callbacks: `[{ observer: "reveal" | "counter", element, is_intersecting }]`.
    #[wasm_bindgen(js_name = on_intersections)]
    pub fn on_intersections(&mut self, now_ms: f64, entries: JsValue) -> Result<JsValue, JsError> {
        let entries: Vec<IntersectionEntry> = if jsvalue_is_undefined_or_null(&entries) {
            Vec::new()
        } else if Array::is_array(&entries) {
            swb::from_value(entries)
                .map_err(|e| JsError::new(&format!("on_intersections parse error: {e}")))?
        } else {
            return Err(JsError::new("on_intersections: entries must be an array"));
        };
        to_js(self.core.on_intersections(now_ms, &entries))
    }

    #[wasm_bindgen(js_name = on_scroll)]
    pub fn on_scroll(&mut self, offset: f64) -> Result<JsValue, JsError> {
        to_js(self.core.on_scroll(offset))
    }

    /// Advance to the frame timestamp `now_ms`. Returns Outputs JSON.
    #[wasm_bindgen]
    pub fn tick(&mut self, now_ms: f64) -> Result<JsValue, JsError> {
        to_js(self.core.tick(now_ms))
    }

    #[wasm_bindgen]
    pub fn unobserve(&mut self, id: u32) -> Result<JsValue, JsError> {
        to_js(self.core.unobserve(ElementId(id)))
    }

    #[wasm_bindgen]
    pub fn teardown(&mut self) -> Result<JsValue, JsError> {
        to_js(self.core.teardown())
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
