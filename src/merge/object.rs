//! Recursive object merge.

use serde_json::{Map, Value};

use super::value::{child_path, ValueKind};
use super::MergeError;

/// Deep-merge `overlay` onto `base`, producing a new object.
///
/// Per key:
/// - only in base: copied unchanged, base key order preserved
/// - only in overlay: appended in overlay iteration order
/// - objects on both sides: merged recursively
/// - arrays on both sides: overlay replaces the base array wholesale
/// - scalar base, or scalar overlay over an object base: overlay wins
/// - an object/array kind conflict, or a scalar overlay over an array
///   base, is a [`MergeError::TypeMismatch`]
///
/// Neither input is modified.
pub fn merge_objects(
    base: &Map<String, Value>,
    overlay: &Map<String, Value>,
) -> Result<Map<String, Value>, MergeError> {
    merge_objects_at(base, overlay, "")
}

pub(crate) fn merge_objects_at(
    base: &Map<String, Value>,
    overlay: &Map<String, Value>,
    path: &str,
) -> Result<Map<String, Value>, MergeError> {
    let mut merged = Map::with_capacity(base.len() + overlay.len());

    for (key, base_value) in base {
        let value = match overlay.get(key) {
            Some(overlay_value) => {
                merge_values(base_value, overlay_value, &child_path(path, key))?
            }
            None => base_value.clone(),
        };
        merged.insert(key.clone(), value);
    }

    for (key, overlay_value) in overlay {
        if !base.contains_key(key) {
            merged.insert(key.clone(), overlay_value.clone());
        }
    }

    Ok(merged)
}

/// Resolve one key present on both sides.
fn merge_values(base: &Value, overlay: &Value, path: &str) -> Result<Value, MergeError> {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            Ok(Value::Object(merge_objects_at(base_map, overlay_map, path)?))
        }
        // Arrays carry no identifiers at this level, so an array may only
        // be replaced by another array. Identified arrays are merged by
        // merge_arrays_by_key at the section level.
        (Value::Array(_), Value::Array(_)) => Ok(overlay.clone()),
        (Value::Array(_), _) | (Value::Object(_), Value::Array(_)) => {
            Err(MergeError::TypeMismatch {
                path: path.to_string(),
                expected: ValueKind::of(base),
                found: ValueKind::of(overlay),
            })
        }
        _ => Ok(overlay.clone()),
    }
}
