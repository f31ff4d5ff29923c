//! Envelope wrapping: inserting a payload into a wrapper template.

use serde_json::Value as JsonValue;

/// Clone `template` and insert `payload` at its first non-ignored key path.
///
/// The search is depth-first first-match over mapping keys, skipping every
/// key in `ignored_keys` (attribute and text markers carry meta-content,
/// not structure). Three cases at each level:
///
/// 1. No eligible key: an object payload merges its top-level fields into
///    the current mapping; any other payload replaces the node.
/// 2. The eligible key's value is a mapping: descend into it.
/// 3. Otherwise: the key's value is overwritten with the payload.
///
/// The template is deep-cloned first, so the caller's template is never
/// mutated and can safely be reused across calls.
pub fn wrap(payload: &JsonValue, template: &JsonValue, ignored_keys: &[String]) -> JsonValue {
    let mut wrapped = template.clone();
    insert_payload(&mut wrapped, payload, ignored_keys);
    wrapped
}

fn insert_payload(node: &mut JsonValue, payload: &JsonValue, ignored_keys: &[String]) {
    if !node.is_object() {
        *node = payload.clone();
        return;
    }

    let slot = node.as_object().and_then(|map| {
        map.keys()
            .find(|key| !ignored_keys.iter().any(|ignored| ignored == *key))
            .cloned()
    });

    match slot {
        None => {
            if let JsonValue::Object(fields) = payload {
                if let Some(map) = node.as_object_mut() {
                    for (key, value) in fields {
                        map.insert(key.clone(), value.clone());
                    }
                }
            } else {
                *node = payload.clone();
            }
        }
        Some(key) => {
            if let Some(value) = node.as_object_mut().and_then(|map| map.get_mut(&key)) {
                if value.is_object() {
                    insert_payload(value, payload, ignored_keys);
                } else {
                    *value = payload.clone();
                }
            }
        }
    }
}
