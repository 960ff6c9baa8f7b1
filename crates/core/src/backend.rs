//! The seam between the render loop and the GPU.
//!
//! [`RenderBackend`] is the minimal set of commands one frame issues. The
//! `render` feature provides the `glow` implementation
//! ([`GpuContext`](crate::render::GpuContext)); tests drive the loop with a
//! recording fake instead.

use crate::pointer::PointerArray;
use crate::viewport::Viewport;
use glam::Vec2;

/// GPU commands needed to draw one frame of the demo.
///
/// Every method is infallible: a backend whose program failed to compile
/// or link keeps accepting commands so the loop never stops. This trait is
/// object-safe.
pub trait RenderBackend {
    /// Resizes the GL viewport to match the canvas.
    fn set_viewport(&mut self, viewport: &Viewport);

    /// Clears the colour buffer.
    fn clear(&mut self, color: [f32; 4]);

    /// Binds the shader program and the quad vertex buffer.
    fn bind_quad(&mut self);

    /// Sets the `time` uniform, in seconds.
    fn set_time(&mut self, seconds: f32);

    /// Sets the `resolution` uniform, in physical pixels.
    fn set_resolution(&mut self, resolution: Vec2);

    /// Sets the `pointers` uniform array.
    fn set_pointers(&mut self, pointers: &PointerArray);

    /// Draws `vertex_count` vertices as triangles.
    fn draw_triangles(&mut self, vertex_count: i32);
}

impl<B: RenderBackend + ?Sized> RenderBackend for Box<B> {
    fn set_viewport(&mut self, viewport: &Viewport) {
        (**self).set_viewport(viewport);
    }

    fn clear(&mut self, color: [f32; 4]) {
        (**self).clear(color);
    }

    fn bind_quad(&mut self) {
        (**self).bind_quad();
    }

    fn set_time(&mut self, seconds: f32) {
        (**self).set_time(seconds);
    }

    fn set_resolution(&mut self, resolution: Vec2) {
        (**self).set_resolution(resolution);
    }

    fn set_pointers(&mut self, pointers: &PointerArray) {
        (**self).set_pointers(pointers);
    }

    fn draw_triangles(&mut self, vertex_count: i32) {
        (**self).draw_triangles(vertex_count);
    }
}
