//! Deep merge of nested configuration values.
//!
//! Every layer of configuration (built-in defaults, the user's file, the
//! ordered lint fragments) is combined with the same rules:
//!
//! - objects merge key by key, recursively;
//! - arrays merge as a stable set union (base elements first, then override
//!   elements not already present);
//! - anything else, including `null` and type mismatches, is replaced by the
//!   override value.
//!
//! A key that is absent from an override never removes the base value.
//!
//! # Example
//!
//! ```rust
//! use codeguard::config::merge::merge_values;
//! use serde_json::json;
//!
//! let base = json!({"ignore": ["dist"], "format": {"semi": true, "tabWidth": 2}});
//! let user = json!({"ignore": ["coverage"], "format": {"tabWidth": 4}});
//!
//! let merged = merge_values(&base, &user);
//! assert_eq!(merged["ignore"], json!(["dist", "coverage"]));
//! assert_eq!(merged["format"], json!({"semi": true, "tabWidth": 4}));
//! ```

use serde_json::{Map, Value};

/// Merge any number of overrides onto `base`, left to right.
///
/// Inputs are never modified; the result is a new value.
#[must_use]
pub fn merge(base: &Value, overrides: &[&Value]) -> Value {
    let mut merged = base.clone();
    for layer in overrides {
        merge_into(&mut merged, layer);
    }
    merged
}

/// Merge a single override onto `base`.
#[must_use]
pub fn merge_values(base: &Value, overlay: &Value) -> Value {
    merge(base, &[overlay])
}

/// Merge `overlay` into `target` in place.
///
/// This is the recursive worker behind [`merge`]; it only ever mutates the
/// freshly cloned accumulator, never a caller's value.
fn merge_into(target: &mut Value, overlay: &Value) {
    match (target, overlay) {
        (Value::Object(target_map), Value::Object(overlay_map)) => {
            merge_maps(target_map, overlay_map);
        }
        (Value::Array(target_arr), Value::Array(overlay_arr)) => {
            *target_arr = union(target_arr, overlay_arr);
        }
        (target, overlay) => {
            *target = overlay.clone();
        }
    }
}

fn merge_maps(target: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for (key, overlay_value) in overlay {
        match target.get_mut(key) {
            Some(existing) => merge_into(existing, overlay_value),
            None => {
                target.insert(key.clone(), overlay_value.clone());
            }
        }
    }
}

/// Stable, deduplicated concatenation of `base` then `extra`.
fn union(base: &[Value], extra: &[Value]) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::with_capacity(base.len() + extra.len());
    for item in base.iter().chain(extra) {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_array_union_is_stable() {
        let merged = merge_values(&json!({"a": [1, 2, 3]}), &json!({"a": [3, 4, 1, 5]}));
        assert_eq!(merged["a"], json!([1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_merge_array_union_is_idempotent() {
        let base = json!({"a": ["x", "y"]});
        let overlay = json!({"a": ["y", "z"]});

        let once = merge_values(&base, &overlay);
        let twice = merge(&base, &[&overlay, &overlay]);
        assert_eq!(once, twice);
        assert_eq!(once["a"], json!(["x", "y", "z"]));
    }

    #[test]
    fn test_merge_array_union_drops_duplicates_within_base() {
        let merged = merge_values(&json!({"a": [1, 1, 2]}), &json!({"a": [2]}));
        assert_eq!(merged["a"], json!([1, 2]));
    }

    #[test]
    fn test_merge_scalar_conflict_replaces() {
        let merged = merge_values(&json!({"a": 1}), &json!({"a": 2}));
        assert_eq!(merged["a"], json!(2));
    }

    #[test]
    fn test_merge_type_mismatch_replaces_entirely() {
        let merged = merge_values(&json!({"a": {"x": 1}}), &json!({"a": 5}));
        assert_eq!(merged["a"], json!(5));

        let merged = merge_values(&json!({"a": [1, 2]}), &json!({"a": {"x": 1}}));
        assert_eq!(merged["a"], json!({"x": 1}));
    }

    #[test]
    fn test_merge_null_override_replaces() {
        let merged = merge_values(&json!({"a": {"x": 1}, "b": 2}), &json!({"a": null}));
        assert_eq!(merged["a"], Value::Null);
        assert_eq!(merged["b"], json!(2));
    }

    #[test]
    fn test_merge_absent_key_keeps_base() {
        let merged = merge_values(&json!({"a": 1, "b": 2}), &json!({"b": 3}));
        assert_eq!(merged, json!({"a": 1, "b": 3}));
    }

    #[test]
    fn test_merge_does_not_mutate_inputs() {
        let base = json!({"a": {"list": [1]}, "s": "keep"});
        let overlay = json!({"a": {"list": [2], "new": true}, "s": "changed"});
        let base_before = base.clone();
        let overlay_before = overlay.clone();

        let _ = merge_values(&base, &overlay);

        assert_eq!(base, base_before);
        assert_eq!(overlay, overlay_before);
    }

    #[test]
    fn test_merge_deep_nesting() {
        let base = json!({"l1": {"l2": {"l3": {"l4": {"keep": 1, "swap": "a"}}}}});
        let overlay = json!({"l1": {"l2": {"l3": {"l4": {"swap": "b", "add": [1]}}}}});

        let merged = merge_values(&base, &overlay);
        assert_eq!(
            merged["l1"]["l2"]["l3"]["l4"],
            json!({"keep": 1, "swap": "b", "add": [1]})
        );
    }

    #[test]
    fn test_merge_multiple_overrides_left_to_right() {
        let merged = merge(
            &json!({"a": 1, "b": 1}),
            &[&json!({"a": 2}), &json!({"a": 3, "c": 3})],
        );
        assert_eq!(merged, json!({"a": 3, "b": 1, "c": 3}));
    }

    #[test]
    fn test_merge_no_overrides_is_clone() {
        let base = json!({"a": [1, 2]});
        assert_eq!(merge(&base, &[]), base);
    }

    #[test]
    fn test_merge_non_object_top_level_replaces() {
        assert_eq!(merge_values(&json!({"a": 1}), &json!("text")), json!("text"));
    }
}
