//! JSON emission
//!
//! Numbers are written from their lexical form. A number that is not valid JSON is written
//! as a string instead.

use super::{SerializeError, Value};

/// Packed JSON with no whitespace
pub fn to_string(value: &Value) -> Result<String, SerializeError> {
    Ok(serde_json::to_string(value)?)
}

/// JSON indented by two spaces per level
pub fn to_string_pretty(value: &Value) -> Result<String, SerializeError> {
    Ok(serde_json::to_string_pretty(value)?)
}
