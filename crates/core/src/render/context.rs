//! GPU context wrapper owning the program, quad buffer and uniform locations.
//!
//! `GpuContext` is created once at startup and is the `glow` implementation
//! of [`RenderBackend`]. Shader diagnostics from the build are logged, not
//! returned as errors, so a broken shader still yields a usable context.

use glam::Vec2;
use glow::HasContext;

use super::shader::{build_program, report_diagnostics, ShaderError};
use crate::backend::RenderBackend;
use crate::pointer::PointerArray;
use crate::quad::{COMPONENTS_PER_VERTEX, POSITION_ATTRIBUTE, QUAD_VERTICES};
use crate::shaders::{POINTERS_UNIFORM, RESOLUTION_UNIFORM, TIME_UNIFORM};
use crate::viewport::Viewport;

type UniformLocation = <glow::Context as HasContext>::UniformLocation;

/// Resolved locations of the three demo uniforms.
///
/// A location is `None` when the program failed to link or the optimizer
/// removed an unused uniform; setting a `None` location is a no-op in GL.
#[derive(Debug, Default)]
pub struct UniformLocations {
    pub time: Option<UniformLocation>,
    pub resolution: Option<UniformLocation>,
    pub pointers: Option<UniformLocation>,
}

/// Wraps a `glow::Context` with the demo's GPU objects.
pub struct GpuContext {
    gl: glow::Context,
    program: glow::Program,
    buffer: glow::Buffer,
    uniforms: UniformLocations,
    diagnostics: Vec<ShaderError>,
}

impl GpuContext {
    /// Builds the program, uploads the quad and resolves uniform locations.
    ///
    /// Compile and link failures are logged through `log::error!` and kept
    /// in [`GpuContext::diagnostics`]; they do not fail construction.
    ///
    /// # Errors
    ///
    /// Returns `ShaderError::CreateError` if a shader, program or buffer
    /// object cannot be created (e.g. the context is lost).
    #[allow(unsafe_code)]
    pub fn new(gl: glow::Context, vertex_src: &str, fragment_src: &str) -> Result<Self, ShaderError> {
        let build = build_program(&gl, vertex_src, fragment_src)?;
        report_diagnostics(&build.diagnostics);

        // SAFETY: glow wraps raw GL calls as unsafe. The buffer handle is
        // checked before use and the program handle comes from build_program.
        let buffer = unsafe {
            gl.create_buffer().map_err(|reason| ShaderError::CreateError {
                object: "buffer",
                reason,
            })?
        };

        let uniforms = unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(QUAD_VERTICES.as_slice()),
                glow::STATIC_DRAW,
            );

            match gl.get_attrib_location(build.program, POSITION_ATTRIBUTE) {
                Some(position) => {
                    gl.enable_vertex_attrib_array(position);
                    gl.vertex_attrib_pointer_f32(
                        position,
                        COMPONENTS_PER_VERTEX,
                        glow::FLOAT,
                        false,
                        0,
                        0,
                    );
                }
                None => log::warn!("vertex attribute '{POSITION_ATTRIBUTE}' not found in program"),
            }

            UniformLocations {
                time: gl.get_uniform_location(build.program, TIME_UNIFORM),
                resolution: gl.get_uniform_location(build.program, RESOLUTION_UNIFORM),
                pointers: gl.get_uniform_location(build.program, POINTERS_UNIFORM),
            }
        };

        if build.is_clean() {
            log::info!("shader program ready");
        }

        Ok(Self {
            gl,
            program: build.program,
            buffer,
            uniforms,
            diagnostics: build.diagnostics,
        })
    }

    /// Returns a reference to the underlying `glow::Context`.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Compile and link problems recorded at startup.
    pub fn diagnostics(&self) -> &[ShaderError] {
        &self.diagnostics
    }

    /// Resolved uniform locations.
    pub fn uniforms(&self) -> &UniformLocations {
        &self.uniforms
    }
}

#[allow(unsafe_code)]
impl RenderBackend for GpuContext {
    fn set_viewport(&mut self, viewport: &Viewport) {
        // SAFETY: plain state-setting call with in-range dimensions.
        unsafe {
            self.gl.viewport(
                0,
                0,
                i32::try_from(viewport.width()).unwrap_or(i32::MAX),
                i32::try_from(viewport.height()).unwrap_or(i32::MAX),
            );
        }
    }

    fn clear(&mut self, color: [f32; 4]) {
        let [r, g, b, a] = color;
        // SAFETY: plain state-setting and clear calls.
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn bind_quad(&mut self) {
        // SAFETY: program and buffer are valid handles created in new().
        unsafe {
            self.gl.use_program(Some(self.program));
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.buffer));
        }
    }

    fn set_time(&mut self, seconds: f32) {
        // SAFETY: location was resolved against the bound program.
        unsafe {
            self.gl.uniform_1_f32(self.uniforms.time.as_ref(), seconds);
        }
    }

    fn set_resolution(&mut self, resolution: Vec2) {
        // SAFETY: location was resolved against the bound program.
        unsafe {
            self.gl
                .uniform_2_f32(self.uniforms.resolution.as_ref(), resolution.x, resolution.y);
        }
    }

    fn set_pointers(&mut self, pointers: &PointerArray) {
        // SAFETY: the slice length matches the vec2[MAX_POINTERS] declaration.
        unsafe {
            self.gl
                .uniform_2_f32_slice(self.uniforms.pointers.as_ref(), pointers.as_slice());
        }
    }

    fn draw_triangles(&mut self, vertex_count: i32) {
        // SAFETY: the bound buffer holds at least vertex_count vertices.
        unsafe {
            self.gl.draw_arrays(glow::TRIANGLES, 0, vertex_count);
        }
    }
}
