//! Namespace-prefix stripping.
//!
//! XML-derived keys often carry a `prefix:` namespace segment
//! (`soap:Body`, `m:GetPrice`). Downstream consumers usually address fields
//! by local name, so this transform rewrites every prefixed key to the
//! substring after the first `:`.

use crate::error::EngineError;
use serde_json::{Map, Value as JsonValue};

/// Strip namespace prefixes from every mapping key in `tree`, mutating the
/// tree in place.
///
/// Only mappings are walked; sequences are not descended into directly, so
/// mappings nested inside sequences keep their prefixed keys (run this
/// after singleton collapse to reach mappings that were array-wrapped).
/// Keys without a `:` are left unchanged. Rewritten keys are re-inserted at
/// the end of the mapping; the resulting key order is deterministic for a
/// given input but otherwise unspecified.
///
/// # Errors
///
/// Returns `DepthExceeded` when the walk descends more than `max_depth`
/// levels below the root.
pub fn strip_namespace_prefixes(
    tree: &mut JsonValue,
    max_depth: usize,
) -> Result<(), EngineError> {
    match tree {
        JsonValue::Object(map) => strip_map(map, 0, max_depth),
        _ => Ok(()),
    }
}

fn strip_map(
    map: &mut Map<String, JsonValue>,
    depth: usize,
    max_depth: usize,
) -> Result<(), EngineError> {
    if depth > max_depth {
        return Err(EngineError::DepthExceeded { max: max_depth });
    }

    let prefixed: Vec<String> = map
        .keys()
        .filter(|key| key.contains(':'))
        .cloned()
        .collect();

    for key in prefixed {
        if let Some(value) = map.shift_remove(&key) {
            let stripped = key
                .split_once(':')
                .map(|(_, local)| local.to_string())
                .unwrap_or_else(|| key.clone());
            map.insert(stripped, value);
        }
    }

    for value in map.values_mut() {
        if let JsonValue::Object(child) = value {
            strip_map(child, depth + 1, max_depth)?;
        }
    }

    Ok(())
}
