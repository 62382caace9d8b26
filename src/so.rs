//! Structured values and their text emitters
//!
//! [`Value`] is the format-agnostic tree every element is rendered into before it becomes
//! text. Emission is a pure function of the value:
//!
//!     json::to_string          packed JSON
//!     json::to_string_pretty   two-space indented JSON
//!     yaml::to_string          block-style YAML with double-quoted strings

pub mod json;
pub mod value;
pub mod yaml;

pub use value::{Object, Value};

use std::fmt;

/// Failure to emit a structured value as text
#[derive(Debug)]
pub enum SerializeError {
    Json(serde_json::Error),
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializeError::Json(err) => write!(f, "JSON serialization failed: {}", err),
        }
    }
}

impl std::error::Error for SerializeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SerializeError::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SerializeError {
    fn from(err: serde_json::Error) -> Self {
        SerializeError::Json(err)
    }
}
