//! JSON serialization for comparison results.

use crate::result::Comparison;

/// Serialize a comparison to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for
/// `Comparison`).
pub fn to_json(comparison: &Comparison) -> Result<String, serde_json::Error> {
    serde_json::to_string(comparison)
}

/// Serialize a comparison to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for
/// `Comparison`).
pub fn to_json_pretty(comparison: &Comparison) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(comparison)
}
