//! Per-section merge policies.
//!
//! Each top-level section of the portal document has exactly one policy,
//! fixed at design time. Sections outside the table are not carried into
//! the merged document from either side.

use serde_json::{Map, Value};

use super::array::merge_arrays_by_key_at;
use super::object::merge_objects_at;
use super::value::{expect_array, expect_object};
use super::MergeError;

/// How a top-level section is composed from base and overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionPolicy {
    /// Deep object merge; the overlay may introduce the section when the
    /// base lacks it.
    ObjectMerge,
    /// Deep object merge, but the section is omitted whenever the base
    /// lacks it, even if the overlay defines it.
    ObjectMergeBaseGated,
    /// Identifier-matched array merge on the named field; omitted
    /// whenever the base lacks the section.
    ArrayByKey(&'static str),
    /// Base copied verbatim whenever present; the overlay side is never
    /// consulted, even as a fallback.
    BaseOnly,
}

/// The fixed policy table applied to every merge
pub const SECTIONS: &[(&str, SectionPolicy)] = &[
    ("info", SectionPolicy::ObjectMerge),
    ("devices", SectionPolicy::ArrayByKey("uid")),
    ("rooms", SectionPolicy::ArrayByKey("key")),
    ("sourceLists", SectionPolicy::ObjectMergeBaseGated),
    ("tieLines", SectionPolicy::BaseOnly),
];

/// Compose the merged document by applying the policy table.
///
/// A section absent from the output map was either absent from the
/// inputs or excluded by its policy; absent sections are omitted rather
/// than set to null.
pub fn merge_sections(
    base: &Map<String, Value>,
    overlay: &Map<String, Value>,
) -> Result<Map<String, Value>, MergeError> {
    let mut merged = Map::new();

    for (name, policy) in SECTIONS {
        if let Some(value) = merge_section(base.get(*name), overlay.get(*name), *policy, name)? {
            merged.insert((*name).to_string(), value);
        }
    }

    Ok(merged)
}

fn merge_section(
    base: Option<&Value>,
    overlay: Option<&Value>,
    policy: SectionPolicy,
    name: &str,
) -> Result<Option<Value>, MergeError> {
    match policy {
        SectionPolicy::ObjectMerge => match (base, overlay) {
            (None, None) => Ok(None),
            (Some(base_value), None) => Ok(Some(base_value.clone())),
            (base_value, Some(overlay_value)) => {
                let empty = Map::new();
                let base_object = match base_value {
                    Some(value) => expect_object(value, name)?,
                    None => &empty,
                };
                let overlay_object = expect_object(overlay_value, name)?;
                Ok(Some(Value::Object(merge_objects_at(
                    base_object,
                    overlay_object,
                    name,
                )?)))
            }
        },
        SectionPolicy::ObjectMergeBaseGated => match (base, overlay) {
            (None, _) => Ok(None),
            (Some(base_value), None) => Ok(Some(base_value.clone())),
            (Some(base_value), Some(overlay_value)) => {
                let base_object = expect_object(base_value, name)?;
                let overlay_object = expect_object(overlay_value, name)?;
                Ok(Some(Value::Object(merge_objects_at(
                    base_object,
                    overlay_object,
                    name,
                )?)))
            }
        },
        SectionPolicy::ArrayByKey(id_field) => match (base, overlay) {
            (None, _) => Ok(None),
            (Some(base_value), None) => Ok(Some(base_value.clone())),
            (Some(base_value), Some(overlay_value)) => {
                let base_array = expect_array(base_value, name)?;
                let overlay_array = expect_array(overlay_value, name)?;
                Ok(Some(Value::Array(merge_arrays_by_key_at(
                    base_array,
                    overlay_array,
                    id_field,
                    name,
                )?)))
            }
        },
        SectionPolicy::BaseOnly => Ok(base.cloned()),
    }
}
