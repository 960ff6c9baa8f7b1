//! WebGL rendering backend.
//!
//! This module is only available when the `render` feature is enabled.
//! It builds the shader program permissively, uploads the full-screen quad
//! and implements [`RenderBackend`](crate::backend::RenderBackend) on top
//! of `glow`.
//!
//! # Module overview
//!
//! - [`shader`] -- Shader compilation, linking and diagnostic formatting.
//! - [`context`] -- GPU context owning the program, quad buffer and uniforms.

pub mod context;
pub mod shader;

pub use context::{GpuContext, UniformLocations};
pub use shader::{
    build_program, compile_shader, format_shader_error, ProgramBuild, ShaderError, ShaderStage,
};
