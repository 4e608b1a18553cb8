// File: playctl-common/src/models/osc.rs

use std::fmt;
use serde::{Deserialize, Serialize};

/// A single decoded OSC argument.
///
/// Only the types a control surface realistically sends are kept as-is.
/// Anything else is carried as `Other` with its type name, so a message with
/// an odd trailing argument still routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OscValue {
    Int(i32),
    Float(f32),
    Str(String),
    Blob(Vec<u8>),
    Long(i64),
    Double(f64),
    Bool(bool),
    Other(String),
}

impl OscValue {
    /// The OSC type tag this value was decoded from ("i", "f", "s", ...).
    pub fn type_tag(&self) -> &str {
        match self {
            OscValue::Int(_) => "i",
            OscValue::Float(_) => "f",
            OscValue::Str(_) => "s",
            OscValue::Blob(_) => "b",
            OscValue::Long(_) => "h",
            OscValue::Double(_) => "d",
            OscValue::Bool(true) => "T",
            OscValue::Bool(false) => "F",
            OscValue::Other(name) => name.as_str(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OscValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for OscValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OscValue::Int(v) => write!(f, "{v}"),
            OscValue::Float(v) => write!(f, "{v}"),
            OscValue::Str(s) => write!(f, "{s:?}"),
            OscValue::Blob(b) => write!(f, "<blob {} bytes>", b.len()),
            OscValue::Long(v) => write!(f, "{v}"),
            OscValue::Double(v) => write!(f, "{v}"),
            OscValue::Bool(v) => write!(f, "{v}"),
            OscValue::Other(name) => write!(f, "<{name}>"),
        }
    }
}
