//! `requestAnimationFrame` as a [`FrameScheduler`].

use std::cell::RefCell;
use std::rc::Rc;

use raymarch_core::{FrameScheduler, RenderLoop};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

use crate::error::WebError;
use crate::SharedContext;

/// Slot holding the frame callback so the callback can re-request itself.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Requests the next frame from the browser.
pub struct AnimationFrameScheduler {
    window: Window,
    callback: FrameCallback,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window, callback: FrameCallback) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_next_frame(&mut self) {
        let slot = self.callback.borrow();
        let Some(callback) = slot.as_ref() else {
            log::warn!("frame requested before the callback was installed");
            return;
        };
        if let Err(e) = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            log::error!("requestAnimationFrame failed: {e:?}");
        }
    }
}

/// Installs the frame callback and runs the first frame synchronously.
///
/// The callback owns the loop, the loop owns the scheduler and the
/// scheduler holds the callback slot, so the cycle keeps everything alive
/// for the lifetime of the page.
pub fn start_loop(window: &Window, ctx: SharedContext) -> Result<(), WebError> {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let mut render_loop = RenderLoop::new(AnimationFrameScheduler::new(
        window.clone(),
        callback.clone(),
    ));
    let origin = ctx.borrow().clock().origin_ms();

    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        render_loop.tick(&mut ctx.borrow_mut(), now);
    }) as Box<dyn FnMut(f64)>));

    let slot = callback.borrow();
    let first = slot.as_ref().ok_or_else(|| WebError::Js("frame callback missing".into()))?;
    let function: &js_sys::Function = first.as_ref().unchecked_ref();
    function
        .call1(&JsValue::NULL, &JsValue::from_f64(origin))
        .map_err(WebError::js)?;

    log::debug!("render loop started");
    Ok(())
}
