//! Per-frame state and the render context that owns it.
//!
//! `RenderContext` replaces the handful of globals a canvas demo usually
//! keeps (program handles, canvas size, pointer list). The application
//! lifecycle owns one instance and hands it to the frame callback and to
//! every input handler.

use crate::backend::RenderBackend;
use crate::clock::FrameClock;
use crate::pointer::{PointerArray, PointerInput};
use crate::quad::QUAD_VERTEX_COUNT;
use crate::viewport::Viewport;
use glam::Vec2;

/// Opaque black.
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Uniform values for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    /// Seconds since start.
    pub time: f32,
    /// Canvas size in physical pixels.
    pub resolution: Vec2,
    /// Pointer positions in physical pixels, bottom-left origin.
    pub pointers: PointerArray,
}

/// Everything the frame callback and input handlers share.
pub struct RenderContext<B> {
    backend: B,
    viewport: Viewport,
    input: PointerInput,
    clock: FrameClock,
    clear_color: [f32; 4],
}

impl<B: RenderBackend> RenderContext<B> {
    /// Creates a context and applies `viewport` to the backend.
    pub fn new(mut backend: B, viewport: Viewport, input: PointerInput, clock: FrameClock) -> Self {
        backend.set_viewport(&viewport);
        Self {
            backend,
            viewport,
            input,
            clock,
            clear_color: DEFAULT_CLEAR_COLOR,
        }
    }

    /// Overrides the colour each frame is cleared to.
    pub fn with_clear_color(mut self, clear_color: [f32; 4]) -> Self {
        self.clear_color = clear_color;
        self
    }

    /// Applies a new canvas size. Calling it twice with the same value is harmless.
    pub fn resize(&mut self, viewport: Viewport) {
        log::debug!("viewport resized to {}x{}", viewport.width(), viewport.height());
        self.viewport = viewport;
        self.backend.set_viewport(&viewport);
    }

    /// Uniforms for a frame at host time `now_ms`.
    pub fn uniforms(&self, now_ms: f64) -> FrameUniforms {
        FrameUniforms {
            time: self.clock.seconds(now_ms),
            resolution: self.viewport.resolution(),
            pointers: *self.input.pointers(),
        }
    }

    /// Issues one frame: clear, bind, upload uniforms, draw the quad.
    pub fn draw(&mut self, now_ms: f64) -> FrameUniforms {
        let uniforms = self.uniforms(now_ms);

        self.backend.clear(self.clear_color);
        self.backend.bind_quad();
        self.backend.set_time(uniforms.time);
        self.backend.set_resolution(uniforms.resolution);
        self.backend.set_pointers(&uniforms.pointers);
        self.backend.draw_triangles(QUAD_VERTEX_COUNT);

        uniforms
    }

    /// `touchstart` / `touchmove` with the current touch list in client coordinates.
    pub fn touch(&mut self, touches: &[Vec2]) {
        let (height, ratio) = self.pointer_space();
        self.input.touch(touches, height, ratio);
    }

    /// `touchend`.
    pub fn touch_end(&mut self) {
        self.input.touch_end();
    }

    /// `mousedown`. Returns `true` if the caller should start listening for moves.
    pub fn mouse_down(&mut self) -> bool {
        self.input.mouse_down()
    }

    /// `mousemove` at `position` in client coordinates.
    pub fn mouse_move(&mut self, position: Vec2) {
        let (height, ratio) = self.pointer_space();
        self.input.mouse_move(position, height, ratio);
    }

    /// `mouseup`. Returns `true` if a drag was in progress.
    pub fn mouse_up(&mut self) -> bool {
        self.input.mouse_up()
    }

    fn pointer_space(&self) -> (f32, f32) {
        (self.viewport.height() as f32, self.viewport.pixel_ratio())
    }

    /// Current canvas size.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Current input state.
    pub fn input(&self) -> &PointerInput {
        &self.input
    }

    /// The clock frames are timed against.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Colour each frame is cleared to.
    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Viewport(u32, u32),
        Clear([f32; 4]),
        Bind,
        Time(f32),
        Resolution(Vec2),
        Pointers(PointerArray),
        Draw(i32),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl RenderBackend for Recorder {
        fn set_viewport(&mut self, viewport: &Viewport) {
            self.calls
                .push(Call::Viewport(viewport.width(), viewport.height()));
        }
        fn clear(&mut self, color: [f32; 4]) {
            self.calls.push(Call::Clear(color));
        }
        fn bind_quad(&mut self) {
            self.calls.push(Call::Bind);
        }
        fn set_time(&mut self, seconds: f32) {
            self.calls.push(Call::Time(seconds));
        }
        fn set_resolution(&mut self, resolution: Vec2) {
            self.calls.push(Call::Resolution(resolution));
        }
        fn set_pointers(&mut self, pointers: &PointerArray) {
            self.calls.push(Call::Pointers(*pointers));
        }
        fn draw_triangles(&mut self, vertex_count: i32) {
            self.calls.push(Call::Draw(vertex_count));
        }
    }

    fn context() -> RenderContext<Recorder> {
        RenderContext::new(
            Recorder::default(),
            Viewport::from_window(400.0, 300.0, 2.0),
            PointerInput::new(true),
            FrameClock::new(1000.0),
        )
    }

    #[test]
    fn new_applies_initial_viewport() {
        let ctx = context();
        assert_eq!(ctx.backend().calls, vec![Call::Viewport(800, 600)]);
    }

    #[test]
    fn draw_issues_commands_in_order() {
        let mut ctx = context();
        ctx.backend_mut().calls.clear();

        ctx.draw(3000.0);

        assert_eq!(
            ctx.backend().calls,
            vec![
                Call::Clear(DEFAULT_CLEAR_COLOR),
                Call::Bind,
                Call::Time(2.0),
                Call::Resolution(Vec2::new(800.0, 600.0)),
                Call::Pointers(PointerArray::new()),
                Call::Draw(6),
            ]
        );
    }

    #[test]
    fn custom_clear_color_is_used() {
        let mut ctx = context().with_clear_color([0.1, 0.2, 0.3, 1.0]);
        ctx.draw(1000.0);
        assert!(ctx
            .backend()
            .calls
            .contains(&Call::Clear([0.1, 0.2, 0.3, 1.0])));
    }

    #[test]
    fn touch_uses_canvas_height_and_pixel_ratio() {
        let mut ctx = context();
        ctx.touch(&[Vec2::new(10.0, 20.0)]);
        let uniforms = ctx.uniforms(1000.0);
        assert_eq!(uniforms.pointers.get(0), Some(Vec2::new(20.0, 560.0)));
    }

    #[test]
    fn resize_updates_resolution_and_pointer_space() {
        let mut ctx = context();
        ctx.resize(Viewport::from_window(100.0, 50.0, 1.0));
        assert_eq!(ctx.uniforms(0.0).resolution, Vec2::new(100.0, 50.0));

        ctx.touch(&[Vec2::new(10.0, 10.0)]);
        assert_eq!(ctx.uniforms(0.0).pointers.get(0), Some(Vec2::new(10.0, 40.0)));
    }

    #[test]
    fn mouse_drag_reaches_uniforms() {
        let mut ctx = context();
        assert!(ctx.mouse_down());
        ctx.mouse_move(Vec2::new(5.0, 5.0));
        assert_eq!(ctx.uniforms(0.0).pointers.get(0), Some(Vec2::new(10.0, 590.0)));
        assert!(ctx.mouse_up());
        assert!(ctx.uniforms(0.0).pointers.is_empty());
    }
}
