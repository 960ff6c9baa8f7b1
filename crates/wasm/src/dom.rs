//! Thin helpers over `web_sys` for the handful of DOM queries the demo needs.

use raymarch_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, WebGlRenderingContext, Window};

use crate::error::WebError;

/// Media query that identifies touch-primary devices.
pub const COARSE_POINTER_QUERY: &str = "(pointer: coarse)";

pub fn window() -> Result<Window, WebError> {
    web_sys::window().ok_or(WebError::NoWindow)
}

pub fn document(window: &Window) -> Result<Document, WebError> {
    window.document().ok_or(WebError::NoDocument)
}

/// Looks up the canvas the demo renders into.
pub fn canvas_by_id(document: &Document, id: &str) -> Result<HtmlCanvasElement, WebError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| WebError::CanvasNotFound(id.to_string()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| WebError::NotACanvas(id.to_string()))
}

/// Acquires a WebGL 1 context from `canvas`.
pub fn webgl_context(canvas: &HtmlCanvasElement) -> Result<WebGlRenderingContext, WebError> {
    canvas
        .get_context("webgl")
        .map_err(WebError::js)?
        .ok_or(WebError::WebGlUnavailable)?
        .dyn_into::<WebGlRenderingContext>()
        .map_err(|_| WebError::WebGlUnavailable)
}

/// `true` on touch-primary devices, where mouse emulation stays off.
pub fn is_coarse_pointer(window: &Window) -> bool {
    match window.match_media(COARSE_POINTER_QUERY) {
        Ok(Some(query)) => query.matches(),
        Ok(None) => false,
        Err(e) => {
            log::warn!("matchMedia failed, assuming fine pointer: {e:?}");
            false
        }
    }
}

/// Canvas size for the current window at `pixel_ratio`.
pub fn window_viewport(window: &Window, pixel_ratio: f64) -> Viewport {
    let inner_width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let inner_height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Viewport::from_window(inner_width, inner_height, pixel_ratio)
}

/// Sets the canvas backing-store size to `viewport`.
pub fn apply_canvas_size(canvas: &HtmlCanvasElement, viewport: &Viewport) {
    canvas.set_width(viewport.width());
    canvas.set_height(viewport.height());
}

/// High-resolution timestamp on the same clock as animation-frame callbacks.
pub fn now_ms(window: &Window) -> f64 {
    window.performance().map_or(0.0, |p| p.now())
}
