//! Singleton-array collapse.
//!
//! Generic XML-to-tree parsing wraps every child element in an array so that
//! repeated elements accumulate. For the common single-occurrence case this
//! produces `{"Name": ["value"]}` where callers expect `{"Name": "value"}`;
//! this transform undoes the wrapping wherever a sequence has exactly one
//! element.

use crate::error::EngineError;
use serde_json::Value as JsonValue;

/// Collapse every one-element sequence in `tree` into its sole element,
/// mutating the tree in place.
///
/// The rule depends only on sequence length, never on element type: a
/// sequence of one scalar collapses the same way as a sequence of one
/// mapping. Sequences of length zero are left untouched; sequences of
/// length two or more are kept, recursing into their container elements.
///
/// # Errors
///
/// Returns `DepthExceeded` when the walk descends more than `max_depth`
/// levels below the root. On error the tree may be partially collapsed and
/// should be discarded.
pub fn collapse_singleton_arrays(
    tree: &mut JsonValue,
    max_depth: usize,
) -> Result<(), EngineError> {
    collapse_value(tree, 0, max_depth)
}

fn collapse_value(
    value: &mut JsonValue,
    depth: usize,
    max_depth: usize,
) -> Result<(), EngineError> {
    if depth > max_depth {
        return Err(EngineError::DepthExceeded { max: max_depth });
    }

    match value {
        JsonValue::Object(map) => {
            for entry in map.values_mut() {
                match entry {
                    JsonValue::Array(items) if items.len() == 1 => {
                        let mut sole = items.remove(0);
                        if sole.is_object() || sole.is_array() {
                            collapse_value(&mut sole, depth + 1, max_depth)?;
                        }
                        *entry = sole;
                    }
                    JsonValue::Array(items) => {
                        for item in items.iter_mut() {
                            if item.is_object() || item.is_array() {
                                collapse_value(item, depth + 1, max_depth)?;
                            }
                        }
                    }
                    JsonValue::Object(_) => {
                        collapse_value(entry, depth + 1, max_depth)?;
                    }
                    _ => {}
                }
            }
            Ok(())
        }
        JsonValue::Array(items) => {
            for item in items.iter_mut() {
                if item.is_object() || item.is_array() {
                    collapse_value(item, depth + 1, max_depth)?;
                }
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collapses_singleton_scalar() {
        let mut tree = json!({"name": ["alice"]});
        collapse_singleton_arrays(&mut tree, 30).unwrap();
        assert_eq!(tree, json!({"name": "alice"}));
    }

    #[test]
    fn test_collapses_singleton_object_recursively() {
        let mut tree = json!({"user": [{"name": ["alice"], "age": ["30"]}]});
        collapse_singleton_arrays(&mut tree, 30).unwrap();
        assert_eq!(tree, json!({"user": {"name": "alice", "age": "30"}}));
    }

    #[test]
    fn test_preserves_longer_sequences() {
        let mut tree = json!({"items": ["a", "b", "c"]});
        collapse_singleton_arrays(&mut tree, 30).unwrap();
        assert_eq!(tree, json!({"items": ["a", "b", "c"]}));
    }

    #[test]
    fn test_recurses_into_elements_of_longer_sequences() {
        let mut tree = json!({"items": [{"id": ["1"]}, {"id": ["2"]}]});
        collapse_singleton_arrays(&mut tree, 30).unwrap();
        assert_eq!(tree, json!({"items": [{"id": "1"}, {"id": "2"}]}));
    }

    #[test]
    fn test_leaves_empty_sequences_untouched() {
        let mut tree = json!({"items": []});
        collapse_singleton_arrays(&mut tree, 30).unwrap();
        assert_eq!(tree, json!({"items": []}));
    }

    #[test]
    fn test_collapse_does_not_depend_on_element_type() {
        // A singleton of a scalar and a singleton of a mapping collapse
        // identically.
        let mut tree = json!({"a": [1], "b": [{"c": [true]}]});
        collapse_singleton_arrays(&mut tree, 30).unwrap();
        assert_eq!(tree, json!({"a": 1, "b": {"c": true}}));
    }

    #[test]
    fn test_recurses_through_plain_mappings() {
        let mut tree = json!({"outer": {"inner": ["x"]}});
        collapse_singleton_arrays(&mut tree, 30).unwrap();
        assert_eq!(tree, json!({"outer": {"inner": "x"}}));
    }

    #[test]
    fn test_depth_at_limit_succeeds() {
        // Deepest container descent is the {"d": "x"} mapping, three levels
        // below the root.
        let mut tree = json!({"a": {"b": {"c": [{"d": "x"}]}}});
        collapse_singleton_arrays(&mut tree, 3).unwrap();
        assert_eq!(tree, json!({"a": {"b": {"c": {"d": "x"}}}}));
    }

    #[test]
    fn test_depth_beyond_limit_fails() {
        let mut tree = json!({"a": {"b": {"c": [{"d": "x"}]}}});
        let err = collapse_singleton_arrays(&mut tree, 2).unwrap_err();
        assert!(matches!(err, EngineError::DepthExceeded { max: 2 }));
    }

    #[test]
    fn test_depth_counts_sequence_descent() {
        // Descent into a sequence element counts the same as descent into a
        // nested mapping.
        let mut tree = json!({"items": [{"a": "x"}, {"b": "y"}]});
        collapse_singleton_arrays(&mut tree, 1).unwrap();

        let mut deep = json!({"items": [{"a": [{"z": "x"}]}, {"b": "y"}]});
        let err = collapse_singleton_arrays(&mut deep, 1).unwrap_err();
        assert!(matches!(err, EngineError::DepthExceeded { max: 1 }));
    }

    #[test]
    fn test_nested_singleton_sequences() {
        let mut tree = json!({"a": [["x"]]});
        collapse_singleton_arrays(&mut tree, 30).unwrap();
        // Only key-level singletons collapse; the inner sequence is kept.
        assert_eq!(tree, json!({"a": ["x"]}));
    }

    #[test]
    fn test_scalar_root_is_noop() {
        let mut tree = json!("just text");
        collapse_singleton_arrays(&mut tree, 30).unwrap();
        assert_eq!(tree, json!("just text"));
    }
}
