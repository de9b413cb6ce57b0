use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a monetary amount from whatever the client sent.
///
/// Numbers pass through, numeric strings are parsed, and everything else
/// (missing, empty, garbage, non-finite) collapses to 0.0. A malformed field
/// must never surface as NaN in a computed total.
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_amount).unwrap_or(0.0))
}

/// Value-level coercion backing [`lenient_amount`].
pub fn coerce_amount(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    finite_or_zero(parsed)
}

/// Collapse NaN and infinities to zero.
pub fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
