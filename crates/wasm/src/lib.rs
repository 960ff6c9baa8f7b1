//! WASM entry point for the raymarch demo.
//!
//! Build with `wasm-pack build crates/wasm --target web` and call
//! `start()` (optionally with a JSON config string) from the host page.

pub mod error;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod scheduler;

pub use error::WebError;

#[cfg(target_arch = "wasm32")]
pub use app::start;

/// Render context shared by the frame callback and the event listeners.
#[cfg(target_arch = "wasm32")]
type SharedContext =
    std::rc::Rc<std::cell::RefCell<raymarch_core::RenderContext<raymarch_core::render::GpuContext>>>;

#[cfg(target_arch = "wasm32")]
mod app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use raymarch_core::quad::QUAD_VERTEX_SHADER;
    use raymarch_core::render::GpuContext;
    use raymarch_core::shaders::RAYMARCH_FRAGMENT_SHADER;
    use raymarch_core::{DemoConfig, FrameClock, PointerInput, RenderContext};
    use wasm_bindgen::prelude::*;

    use crate::error::WebError;
    use crate::{dom, events, scheduler};

    /// Starts the demo on the configured canvas.
    ///
    /// `config` is an optional JSON object (`canvas_id`, `pixel_ratio`,
    /// `clear_color`, `log_level`, `mouse_emulation`). Shader errors are
    /// logged to the console and do not fail this call.
    #[wasm_bindgen]
    pub fn start(config: Option<String>) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let config = DemoConfig::from_json_str(config.as_deref().unwrap_or_default())
            .map_err(WebError::from)?;

        // A second start() keeps the first logger.
        console_log::init_with_level(config.log_level.to_level()).ok();
        log::debug!("starting with config {}", config.to_json());

        run(&config).map_err(|e| {
            log::error!("startup failed: {e}");
            JsValue::from(e)
        })
    }

    fn run(config: &DemoConfig) -> Result<(), WebError> {
        let window = dom::window()?;
        let document = dom::document(&window)?;
        let canvas = dom::canvas_by_id(&document, &config.canvas_id)?;
        let pixel_ratio = config
            .pixel_ratio
            .unwrap_or_else(|| window.device_pixel_ratio());

        let gl = glow::Context::from_webgl1_context(dom::webgl_context(&canvas)?);
        let gpu = GpuContext::new(gl, QUAD_VERTEX_SHADER, RAYMARCH_FRAGMENT_SHADER)?;

        let viewport = dom::window_viewport(&window, pixel_ratio);
        dom::apply_canvas_size(&canvas, &viewport);

        let mouse_enabled = config.mouse_emulation && !dom::is_coarse_pointer(&window);
        let clock = FrameClock::new(dom::now_ms(&window));

        let ctx = Rc::new(RefCell::new(
            RenderContext::new(gpu, viewport, PointerInput::new(mouse_enabled), clock)
                .with_clear_color(config.clear_color),
        ));

        scheduler::start_loop(&window, ctx.clone())?;

        events::install_touch(&canvas, &ctx)?;
        events::install_resize(&window, &canvas, &ctx, pixel_ratio)?;
        if mouse_enabled {
            events::install_mouse(&canvas, &ctx)?;
        }

        log::info!(
            "raymarch running at {}x{} (pixel ratio {pixel_ratio}, mouse {})",
            viewport.width(),
            viewport.height(),
            if mouse_enabled { "on" } else { "off" }
        );
        Ok(())
    }
}
