//! Double-document merge facade.

use serde_json::{Map, Value};

use super::sections::merge_sections;
use super::MergeError;

/// Key of the site-specific overlay document
const SYSTEM_KEY: &str = "system";
/// Key of the reusable template document
const TEMPLATE_KEY: &str = "template";
/// Top-level scalars copied verbatim onto the merged result
const PASSTHROUGH_KEYS: &[&str] = &["system_url", "template_url"];

/// Merge a raw double-configuration document.
///
/// The input carries the two partial documents side by side:
///
/// ```json
/// {
///   "system_url": "...",
///   "template_url": "...",
///   "template": { "info": {}, "devices": [], "rooms": [] },
///   "system":   { "info": {}, "devices": [] }
/// }
/// ```
///
/// The template is the base and the system document is overlaid onto it
/// section by section; `system_url` and `template_url` are copied
/// verbatim when present. An absent or non-object `template`/`system`
/// subtree is treated as an empty document. The input is not modified,
/// and the first unreconcilable shape aborts the call with no partial
/// output.
pub fn merge_double_config(raw: &Value) -> Result<Value, MergeError> {
    let empty = Map::new();
    let base = raw
        .get(TEMPLATE_KEY)
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let overlay = raw
        .get(SYSTEM_KEY)
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let mut merged = merge_sections(base, overlay)?;

    for key in PASSTHROUGH_KEYS {
        if let Some(value) = raw.get(*key) {
            merged.insert((*key).to_string(), value.clone());
        }
    }

    Ok(Value::Object(merged))
}
