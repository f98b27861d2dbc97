//! Canonical value converters
//!
//! Pure functions translating attribute values between the unified
//! representation and a platform's native one. Rounding uses
//! [`f64::round`] (nearest, ties away from zero), which on the
//! non-negative ranges handled here is round-half-up.
//!
//! Converters are not exact inverses of each other. Hue drifts by up to two
//! degrees on a round trip, HSV brightness can land one step off, and the
//! fixed-point precision conversion drops fractional input from the
//! platform side.

use crate::error::{RegistryError, Result};
use serde_json::{json, Value};

/// Unified brightness 0-100 to platform 0-1000
pub const BRIGHTNESS_SCALE: f64 = 10.0;
/// Degrees per percent of hue
pub const HUE_DEGREES_PER_PERCENT: f64 = 3.6;
/// Platform HSV brightness 0-255 per unified percent
pub const HSV_VALUE_SCALE: f64 = 2.55;

/// Extract a finite number from a JSON number or a numeric string
pub fn numeric_value(value: &Value) -> Result<f64> {
    let numeric = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match numeric {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(RegistryError::invalid_value(format!(
            "expected a number, got {value}"
        ))),
    }
}

fn rounded(n: f64) -> Result<Value> {
    integer_value(n.round())
}

fn truncated(n: f64) -> Result<Value> {
    integer_value(n.trunc())
}

fn integer_value(n: f64) -> Result<Value> {
    if (i64::MIN as f64..i64::MAX as f64).contains(&n) {
        Ok(Value::from(n as i64))
    } else {
        Err(RegistryError::invalid_value(format!(
            "{n} is out of range after conversion"
        )))
    }
}

/// `round(v * 10)`
pub fn brightness_to_platform(value: &Value) -> Result<Value> {
    rounded(numeric_value(value)? * BRIGHTNESS_SCALE)
}

/// `round(v / 10)`
pub fn brightness_from_platform(value: &Value) -> Result<Value> {
    rounded(numeric_value(value)? / BRIGHTNESS_SCALE)
}

/// Degrees 0-360 to percent 0-100: `round(v / 3.6)`
pub fn hue_to_platform(value: &Value) -> Result<Value> {
    rounded(numeric_value(value)? / HUE_DEGREES_PER_PERCENT)
}

/// Percent 0-100 to degrees 0-360: `round(v * 3.6)`
pub fn hue_from_platform(value: &Value) -> Result<Value> {
    rounded(numeric_value(value)? * HUE_DEGREES_PER_PERCENT)
}

/// Encode unified `{h, s, v}` (v in 0-100) as the platform's JSON string
/// with v in 0-255. Hue and saturation pass through unscaled, truncated to
/// integers.
pub fn hsv_to_platform(value: &Value) -> Result<Value> {
    let (h, s, v) = hsv_components(value)?;
    let encoded = json!({
        "h": truncated(h)?,
        "s": truncated(s)?,
        "v": rounded(v * HSV_VALUE_SCALE)?,
    });
    Ok(Value::String(serde_json::to_string(&encoded)?))
}

/// Decode the platform's JSON string into unified `{h, s, v}` with v in 0-100.
/// Hue and saturation are truncated to integers.
pub fn hsv_from_platform(value: &Value) -> Result<Value> {
    let encoded = value.as_str().ok_or_else(|| {
        RegistryError::invalid_value(format!("expected an encoded HSV string, got {value}"))
    })?;

    let decoded: Value = serde_json::from_str(encoded).map_err(|e| {
        RegistryError::parsing(format!("Unable to parse HSV color '{encoded}': {e}"))
    })?;

    let (h, s, v) = hsv_components(&decoded)?;
    Ok(json!({
        "h": truncated(h)?,
        "s": truncated(s)?,
        "v": rounded(v / HSV_VALUE_SCALE)?,
    }))
}

fn hsv_components(value: &Value) -> Result<(f64, f64, f64)> {
    let component = |key: &str| -> Result<f64> {
        let raw = value.get(key).ok_or_else(|| {
            RegistryError::invalid_value(format!("HSV value is missing '{key}': {value}"))
        })?;
        numeric_value(raw)
    };

    Ok((component("h")?, component("s")?, component("v")?))
}

/// Unified integer 0-100 to platform fixed-point 0.00-100.00
pub fn precision_to_platform(value: &Value) -> Result<Value> {
    let scaled = (numeric_value(value)? * 100.0).round() / 100.0;
    if !scaled.is_finite() {
        return Err(RegistryError::invalid_value(format!(
            "{value} is out of range for a fixed-point level"
        )));
    }
    Ok(Value::from(scaled))
}

/// Platform 0.00-100.00 to unified integer; the fraction is dropped
pub fn precision_from_platform(value: &Value) -> Result<Value> {
    rounded(numeric_value(value)?)
}

/// Render a numeric value with two decimals, as fixed-point platforms expect
pub fn format_two_decimals(value: &Value) -> Option<String> {
    numeric_value(value).ok().map(|n| format!("{n:.2}"))
}
