//! The perpetual render loop and the scheduler it runs on.
//!
//! The browser drives the loop through `requestAnimationFrame`; here that is
//! just a [`FrameScheduler`] so the loop itself stays host-independent.

use crate::backend::RenderBackend;
use crate::frame::{FrameUniforms, RenderContext};

/// Host hook that arranges for the next frame callback.
pub trait FrameScheduler {
    /// Requests one more frame callback at the next display refresh.
    fn request_next_frame(&mut self);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for &mut S {
    fn request_next_frame(&mut self) {
        (**self).request_next_frame();
    }
}

/// Draws a frame and reschedules itself, forever.
pub struct RenderLoop<S> {
    scheduler: S,
    frames: u64,
}

impl<S: FrameScheduler> RenderLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            frames: 0,
        }
    }

    /// Runs the first frame synchronously at the clock origin.
    pub fn start<B: RenderBackend>(&mut self, ctx: &mut RenderContext<B>) -> FrameUniforms {
        let origin = ctx.clock().origin_ms();
        self.tick(ctx, origin)
    }

    /// One frame callback: draw, then request the next frame.
    ///
    /// There is no failure path; a broken shader program still draws
    /// (nothing visible) and the loop keeps going.
    pub fn tick<B: RenderBackend>(&mut self, ctx: &mut RenderContext<B>, now_ms: f64) -> FrameUniforms {
        let uniforms = ctx.draw(now_ms);
        self.frames += 1;
        self.scheduler.request_next_frame();
        uniforms
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}
