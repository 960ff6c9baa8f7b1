//! DOM event listeners feeding the shared render context.
//!
//! Touch listeners are always installed. Mouse listeners are installed only
//! when mouse emulation is enabled; the `mousemove` listener is attached on
//! `mousedown` and detached on `mouseup`, so hovering never moves the camera.

use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use crate::dom;
use crate::error::WebError;
use crate::SharedContext;

/// Active touch points of `event` in client coordinates, in list order.
fn touch_points(event: &TouchEvent) -> Vec<Vec2> {
    let list = event.touches();
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|touch| Vec2::new(touch.client_x() as f32, touch.client_y() as f32))
        .collect()
}

fn mouse_point(event: &MouseEvent) -> Vec2 {
    Vec2::new(event.client_x() as f32, event.client_y() as f32)
}

/// Registers `handler` for `event` on `target` for the lifetime of the page.
fn listen<E, F>(target: &EventTarget, event: &str, handler: F) -> Result<(), WebError>
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(WebError::js)?;
    closure.forget();
    Ok(())
}

/// Touch start/move/end on the canvas.
pub fn install_touch(canvas: &HtmlCanvasElement, ctx: &SharedContext) -> Result<(), WebError> {
    for event in ["touchstart", "touchmove"] {
        let ctx = ctx.clone();
        listen(canvas, event, move |e: TouchEvent| {
            ctx.borrow_mut().touch(&touch_points(&e));
        })?;
    }

    let ctx = ctx.clone();
    listen(canvas, "touchend", move |_: TouchEvent| {
        ctx.borrow_mut().touch_end();
    })
}

/// Mouse-down/move/up on the canvas, emulating a single touch while pressed.
pub fn install_mouse(canvas: &HtmlCanvasElement, ctx: &SharedContext) -> Result<(), WebError> {
    let on_move: Rc<Closure<dyn FnMut(MouseEvent)>> = {
        let ctx = ctx.clone();
        Rc::new(Closure::wrap(Box::new(move |e: MouseEvent| {
            ctx.borrow_mut().mouse_move(mouse_point(&e));
        }) as Box<dyn FnMut(MouseEvent)>))
    };

    {
        let ctx = ctx.clone();
        let target = canvas.clone();
        let on_move = on_move.clone();
        listen(canvas, "mousedown", move |_: MouseEvent| {
            if !ctx.borrow_mut().mouse_down() {
                return;
            }
            if let Err(e) = target.add_event_listener_with_callback(
                "mousemove",
                on_move.as_ref().as_ref().unchecked_ref(),
            ) {
                log::error!("failed to attach mousemove listener: {e:?}");
            }
        })?;
    }

    let ctx = ctx.clone();
    let target = canvas.clone();
    listen(canvas, "mouseup", move |_: MouseEvent| {
        if let Err(e) = target.remove_event_listener_with_callback(
            "mousemove",
            on_move.as_ref().as_ref().unchecked_ref(),
        ) {
            log::error!("failed to detach mousemove listener: {e:?}");
        }
        ctx.borrow_mut().mouse_up();
    })
}

/// Window resize: recompute the canvas size and GL viewport.
pub fn install_resize(
    window: &Window,
    canvas: &HtmlCanvasElement,
    ctx: &SharedContext,
    pixel_ratio: f64,
) -> Result<(), WebError> {
    let ctx = ctx.clone();
    let canvas = canvas.clone();
    let source = window.clone();
    listen(window, "resize", move |_: web_sys::Event| {
        let viewport = dom::window_viewport(&source, pixel_ratio);
        dom::apply_canvas_size(&canvas, &viewport);
        ctx.borrow_mut().resize(viewport);
    })
}
