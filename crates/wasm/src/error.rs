//! Startup errors surfaced to JavaScript.

use raymarch_core::render::ShaderError;
use raymarch_core::ConfigError;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Anything that stops the demo from starting.
///
/// Shader compile/link failures are not in here: those are logged and the
/// loop runs anyway. `Gpu` only covers GL objects that could not be created.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("no element with id '{0}'")]
    CanvasNotFound(String),

    #[error("element '{0}' is not a <canvas>")]
    NotACanvas(String),

    #[error("WebGL is not available")]
    WebGlUnavailable,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("GPU setup failed: {0}")]
    Gpu(#[from] ShaderError),

    /// A DOM call threw.
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl WebError {
    /// Wraps a thrown JS value.
    pub fn js(value: JsValue) -> Self {
        WebError::Js(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
