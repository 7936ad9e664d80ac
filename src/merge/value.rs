//! Node classification and path formatting for merge diagnostics.

use serde_json::{Map, Value};
use std::fmt;

use super::MergeError;

/// Shape of a document tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Object,
    Array,
    /// String, number, boolean, or null
    Scalar,
}

impl ValueKind {
    /// Classify a tree node
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => ValueKind::Object,
            Value::Array(_) => ValueKind::Array,
            _ => ValueKind::Scalar,
        }
    }

    /// Returns the lowercase name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Object => "object",
            ValueKind::Array => "array",
            ValueKind::Scalar => "scalar",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Extend a dotted path with a child key
pub(crate) fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

/// Extend a path with an array index
pub(crate) fn index_path(path: &str, index: usize) -> String {
    format!("{}[{}]", path, index)
}

/// Borrow `value` as an object, or report a mismatch at `path`
pub(crate) fn expect_object<'a>(
    value: &'a Value,
    path: &str,
) -> Result<&'a Map<String, Value>, MergeError> {
    value.as_object().ok_or_else(|| MergeError::TypeMismatch {
        path: path.to_string(),
        expected: ValueKind::Object,
        found: ValueKind::of(value),
    })
}

/// Borrow `value` as an array, or report a mismatch at `path`
pub(crate) fn expect_array<'a>(value: &'a Value, path: &str) -> Result<&'a [Value], MergeError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| MergeError::TypeMismatch {
            path: path.to_string(),
            expected: ValueKind::Array,
            found: ValueKind::of(value),
        })
}
