//! Startup configuration for the demo.
//!
//! The host page may pass a JSON object to `start`. Every key is optional;
//! see [`DemoConfig::from_json`] for the lenient/strict split.

use crate::error::ConfigError;
use crate::frame::DEFAULT_CLEAR_COLOR;
use crate::params::{param_bool, param_f32_array, param_opt_f64, param_string};
use serde::Serialize;
use serde_json::Value;

/// Element id looked up when `canvas_id` is not given.
pub const DEFAULT_CANVAS_ID: &str = "canvas";

/// Verbosity of the browser console logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parses a level name, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(ConfigError::UnknownLogLevel(name.to_string())),
        }
    }

    /// The matching `log` crate level.
    pub fn to_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Settings read once at startup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoConfig {
    /// Id of the `<canvas>` element to render into.
    pub canvas_id: String,
    /// Overrides `window.devicePixelRatio` when set.
    pub pixel_ratio: Option<f64>,
    /// Colour each frame is cleared to before the quad is drawn.
    pub clear_color: [f32; 4],
    /// Console log verbosity.
    pub log_level: LogLevel,
    /// Whether a mouse drag may stand in for a touch. Always off on
    /// coarse-pointer devices regardless of this flag.
    pub mouse_emulation: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            canvas_id: DEFAULT_CANVAS_ID.to_string(),
            pixel_ratio: None,
            clear_color: DEFAULT_CLEAR_COLOR,
            log_level: LogLevel::Info,
            mouse_emulation: true,
        }
    }
}

impl DemoConfig {
    /// Parses a config from JSON text. Empty or whitespace-only text yields the defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    /// Builds a config from a JSON object.
    ///
    /// Keys that are missing or hold the wrong JSON type fall back to their
    /// defaults. Keys that hold the right type but an unusable value (a
    /// negative pixel ratio, a three-component colour, an unknown log level,
    /// an empty canvas id) are rejected.
    pub fn from_json(params: &Value) -> Result<Self, ConfigError> {
        if !params.is_object() {
            return Err(ConfigError::NotAnObject);
        }
        let defaults = Self::default();

        let canvas_id = param_string(params, "canvas_id", &defaults.canvas_id);
        if canvas_id.is_empty() {
            return Err(ConfigError::EmptyCanvasId);
        }

        let pixel_ratio = match param_opt_f64(params, "pixel_ratio") {
            Some(ratio) if !(ratio.is_finite() && ratio > 0.0) => {
                return Err(ConfigError::InvalidPixelRatio(ratio));
            }
            other => other,
        };

        let clear_color = match param_f32_array(params, "clear_color") {
            Some(components) => parse_clear_color(&components)?,
            None => defaults.clear_color,
        };

        let log_level = match params.get("log_level").and_then(Value::as_str) {
            Some(name) => LogLevel::from_name(name)?,
            None => defaults.log_level,
        };

        Ok(Self {
            canvas_id,
            pixel_ratio,
            clear_color,
            log_level,
            mouse_emulation: param_bool(params, "mouse_emulation", defaults.mouse_emulation),
        })
    }

    /// The effective config as JSON, for logging.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn parse_clear_color(components: &[f32]) -> Result<[f32; 4], ConfigError> {
    let color: [f32; 4] = components.try_into().map_err(|_| {
        ConfigError::InvalidClearColor(format!(
            "expected 4 components, got {}",
            components.len()
        ))
    })?;
    if let Some(bad) = color.iter().find(|c| !(0.0..=1.0).contains(*c)) {
        return Err(ConfigError::InvalidClearColor(format!(
            "component {bad} is outside [0, 1]"
        )));
    }
    Ok(color)
}
