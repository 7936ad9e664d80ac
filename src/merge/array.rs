//! Array merge keyed on an identifier field.

use serde_json::Value;

use super::object::merge_objects_at;
use super::value::{expect_object, index_path};
use super::MergeError;

/// Merge two arrays of objects, matching elements on `id_field`.
///
/// The base's shape wins: output length and order always equal the
/// base's. Each base element is object-merged with the first overlay
/// element carrying an equal identifier value; base elements with no
/// match are copied unchanged, and overlay elements with no match are
/// dropped. The overlay can modify existing members but never introduce
/// new ones.
///
/// Identifier comparison is typed: a numeric `1` never matches a string
/// `"1"`. Elements lacking the identifier field never match; a base
/// element that is not an object is a [`MergeError::TypeMismatch`].
pub fn merge_arrays_by_key(
    base: &[Value],
    overlay: &[Value],
    id_field: &str,
) -> Result<Vec<Value>, MergeError> {
    merge_arrays_by_key_at(base, overlay, id_field, "")
}

pub(crate) fn merge_arrays_by_key_at(
    base: &[Value],
    overlay: &[Value],
    id_field: &str,
    path: &str,
) -> Result<Vec<Value>, MergeError> {
    let mut merged = Vec::with_capacity(base.len());

    for (index, element) in base.iter().enumerate() {
        let element_path = index_path(path, index);
        let base_object = expect_object(element, &element_path)?;

        let matched = base_object.get(id_field).and_then(|id| {
            overlay.iter().find(|candidate| {
                candidate
                    .as_object()
                    .and_then(|object| object.get(id_field))
                    .is_some_and(|other| other == id)
            })
        });

        merged.push(match matched {
            Some(overlay_element) => {
                let overlay_object = expect_object(overlay_element, &element_path)?;
                Value::Object(merge_objects_at(base_object, overlay_object, &element_path)?)
            }
            None => element.clone(),
        });
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn arr(value: Value) -> Vec<Value> {
        match value {
            Value::Array(elements) => elements,
            other => panic!("fixture is not an array: {other}"),
        }
    }

    #[test]
    fn test_base_shape_wins() {
        let base = arr(json!([{"uid": 1, "name": "A"}, {"uid": 2, "name": "Z"}]));
        let overlay = arr(json!([{"uid": 1, "name": "B"}, {"uid": 3, "name": "C"}]));

        let merged = merge_arrays_by_key(&base, &overlay, "uid").unwrap();

        assert_eq!(
            Value::Array(merged),
            json!([{"uid": 1, "name": "B"}, {"uid": 2, "name": "Z"}])
        );
    }

    #[test]
    fn test_empty_overlay_returns_base() {
        let base = arr(json!([{"uid": 1}, {"uid": 2}]));

        let merged = merge_arrays_by_key(&base, &[], "uid").unwrap();

        assert_eq!(merged, base);
    }

    #[test]
    fn test_empty_base_returns_empty() {
        let overlay = arr(json!([{"uid": 1, "name": "new"}]));

        let merged = merge_arrays_by_key(&[], &overlay, "uid").unwrap();

        assert!(merged.is_empty());
    }

    #[test]
    fn test_match_merges_deeply() {
        let base = arr(json!([{"uid": 7, "properties": {"volume": 30, "mute": false}}]));
        let overlay = arr(json!([{"uid": 7, "properties": {"volume": 55}}]));

        let merged = merge_arrays_by_key(&base, &overlay, "uid").unwrap();

        assert_eq!(
            Value::Array(merged),
            json!([{"uid": 7, "properties": {"volume": 55, "mute": false}}])
        );
    }

    #[test]
    fn test_typed_identifier_never_cross_matches() {
        let base = arr(json!([{"uid": "1", "name": "A"}]));
        let overlay = arr(json!([{"uid": 1, "name": "B"}]));

        let merged = merge_arrays_by_key(&base, &overlay, "uid").unwrap();

        assert_eq!(merged[0]["name"], "A");
    }

    #[test]
    fn test_missing_identifier_never_matches() {
        let base = arr(json!([{"name": "no-id"}, {"uid": 2, "name": "Z"}]));
        let overlay = arr(json!([{"uid": 2, "name": "Y"}, {"name": "also-no-id"}]));

        let merged = merge_arrays_by_key(&base, &overlay, "uid").unwrap();

        assert_eq!(
            Value::Array(merged),
            json!([{"name": "no-id"}, {"uid": 2, "name": "Y"}])
        );
    }

    #[test]
    fn test_first_overlay_match_wins() {
        let base = arr(json!([{"uid": 1, "name": "A"}]));
        let overlay = arr(json!([{"uid": 1, "name": "first"}, {"uid": 1, "name": "second"}]));

        let merged = merge_arrays_by_key(&base, &overlay, "uid").unwrap();

        assert_eq!(merged[0]["name"], "first");
    }

    #[test]
    fn test_non_object_base_element_rejected() {
        let base = arr(json!([{"uid": 1}, "stray"]));
        let overlay = arr(json!([{"uid": 1}]));

        let err = merge_arrays_by_key(&base, &overlay, "uid").unwrap_err();

        assert_eq!(err.path(), "[1]");
    }

    #[test]
    fn test_inputs_unmodified() {
        let base = arr(json!([{"uid": 1, "name": "A"}]));
        let overlay = arr(json!([{"uid": 1, "name": "B"}]));
        let base_snapshot = base.clone();
        let overlay_snapshot = overlay.clone();

        merge_arrays_by_key(&base, &overlay, "uid").unwrap();

        assert_eq!(base, base_snapshot);
        assert_eq!(overlay, overlay_snapshot);
    }
}
