//! Pure helper functions for extracting typed settings from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value and a key name. Missing keys and values of
//! the wrong JSON type fall back to the default (or `None`); these never fail.
//! Range checks are left to the caller.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    param_opt_f64(params, name).unwrap_or(default)
}

/// Extracts an `f64` from `params[name]`, or `None` if missing or wrong type.
pub fn param_opt_f64(params: &Value, name: &str) -> Option<f64> {
    params.get(name).and_then(Value::as_f64)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Extracts an array of numbers from `params[name]` as `f32`s.
///
/// Returns `None` if the key is missing or not an array. Non-numeric
/// elements are kept as `NaN` so callers can reject them during validation.
pub fn param_f32_array(params: &Value, name: &str) -> Option<Vec<f32>> {
    params.get(name).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .map(|v| v.as_f64().map_or(f32::NAN, |f| f as f32))
            .collect()
    })
}
