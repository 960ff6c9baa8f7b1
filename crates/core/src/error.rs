//! Error types for the raymarch core.

use thiserror::Error;

/// Errors produced while reading a [`DemoConfig`](crate::config::DemoConfig).
///
/// Missing or wrongly typed keys are not errors (they fall back to
/// defaults); these variants cover values that are present but unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config text was not valid JSON.
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The config parsed but was not a JSON object.
    #[error("config must be a JSON object")]
    NotAnObject,

    /// The canvas element id was empty.
    #[error("canvas_id must not be empty")]
    EmptyCanvasId,

    /// The pixel ratio was zero, negative or not finite.
    #[error("pixel_ratio must be a positive finite number, got {0}")]
    InvalidPixelRatio(f64),

    /// The clear colour was not four numbers in [0, 1].
    #[error("invalid clear_color: {0}")]
    InvalidClearColor(String),

    /// The log level name was not recognized.
    #[error("unknown log_level '{0}' (expected error, warn, info, debug or trace)")]
    UnknownLogLevel(String),
}
