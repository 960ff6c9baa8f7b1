#![deny(unsafe_code)]
//! Core types for a full-screen raymarching canvas demo.
//!
//! Provides pointer/touch translation into the shader's `pointers` uniform,
//! device-pixel viewport math, the frame clock, the `RenderContext` that
//! owns per-frame state, the scheduler-driven `RenderLoop`, the shader
//! sources, and startup configuration. The `render` feature adds the
//! `glow` implementation of the `RenderBackend` seam.

pub mod backend;
pub mod clock;
pub mod config;
pub mod error;
pub mod frame;
pub mod params;
pub mod pointer;
pub mod quad;
pub mod schedule;
pub mod shaders;
pub mod viewport;

#[cfg(feature = "render")]
pub mod render;

pub use backend::RenderBackend;
pub use clock::FrameClock;
pub use config::{DemoConfig, LogLevel};
pub use error::ConfigError;
pub use frame::{FrameUniforms, RenderContext};
pub use pointer::{PointerArray, PointerInput, PointerSource, MAX_POINTERS};
pub use schedule::{FrameScheduler, RenderLoop};
pub use viewport::Viewport;
