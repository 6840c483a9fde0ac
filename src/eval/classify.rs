//! Result classification and display formatting.

use serde_json::Value;
use std::fmt;

/// Closed classification of an evaluation result.
///
/// `None` (an absent result) classifies as [`ValueKind::Undefined`]; every
/// JSON value falls into exactly one of the remaining variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// JSON `null`.
    Null,
    /// Absent result.
    Undefined,
    /// Array, carrying its length.
    Array(usize),
    /// Object.
    Object,
    /// String.
    String,
    /// Number with no fractional part.
    Integer,
    /// Number with a fractional part.
    Number,
    /// Boolean.
    Boolean,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Undefined => write!(f, "undefined"),
            Self::Array(len) => write!(f, "array[{len}]"),
            Self::Object => write!(f, "object"),
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::Number => write!(f, "number"),
            Self::Boolean => write!(f, "boolean"),
        }
    }
}

/// Classify an evaluation result. Total over its input domain.
#[must_use]
pub fn classify(value: Option<&Value>) -> ValueKind {
    match value {
        None => ValueKind::Undefined,
        Some(Value::Null) => ValueKind::Null,
        Some(Value::Array(items)) => ValueKind::Array(items.len()),
        Some(Value::String(_)) => ValueKind::String,
        Some(Value::Number(n)) => {
            if n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0) {
                ValueKind::Integer
            } else {
                ValueKind::Number
            }
        }
        Some(Value::Bool(_)) => ValueKind::Boolean,
        Some(Value::Object(_)) => ValueKind::Object,
    }
}

/// Format a result for display.
///
/// `null` and absent results render as literals, strings render bare
/// (unquoted), numbers and booleans render as their textual form, and
/// containers pretty-print as indented JSON. If pretty-printing fails the
/// compact textual form is used rather than propagating the error.
#[must_use]
pub fn format_value(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
        Some(v) => serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string()),
    }
}
