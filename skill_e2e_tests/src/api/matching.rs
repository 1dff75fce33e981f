// api/matching.rs - Subset matching of JSON values
//
// `contains(actual, expected)` is true when `expected` is "inside" `actual`:
//   object -> every expected field exists in actual and matches recursively;
//             extra fields in actual are ignored
//   array  -> every expected element matches some element of actual;
//             order and extra elements are ignored, which makes tag lists
//             compare as sets
//   scalar -> plain equality

use serde_json::Value;

pub fn contains(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Object(actual), Value::Object(expected)) => expected.iter().all(|(field, want)| {
            actual
                .get(field)
                .map(|have| contains(have, want))
                .unwrap_or(false)
        }),
        (Value::Array(actual), Value::Array(expected)) => expected
            .iter()
            .all(|want| actual.iter().any(|have| contains(have, want))),
        (actual, expected) => actual == expected,
    }
}

/// True if `actual` is an array with at least one element containing `expected`
pub fn any_element_contains(actual: &Value, expected: &Value) -> bool {
    actual
        .as_array()
        .map(|items| items.iter().any(|item| contains(item, expected)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_subset() {
        let actual = json!({"key": "a", "name": "A", "logo": "x"});
        assert!(contains(&actual, &json!({"name": "A"})));
        assert!(contains(&actual, &json!({})));
        assert!(!contains(&actual, &json!({"name": "B"})));
        assert!(!contains(&actual, &json!({"missing": "A"})));
    }

    #[test]
    fn test_array_is_set_containment() {
        let tags = json!(["node", "javascript", "typescript", "automation", "testing"]);
        assert!(contains(&tags, &json!(["testing", "node"])));
        assert!(contains(&tags, &json!(["node", "node"])));
        assert!(!contains(&tags, &json!(["node", "rust"])));
    }

    #[test]
    fn test_nested_tags_inside_object() {
        let actual = json!({"key": "k", "tags": ["b", "a", "c"]});
        assert!(contains(&actual, &json!({"key": "k", "tags": ["a", "b"]})));
        assert!(!contains(&actual, &json!({"tags": ["d"]})));
    }

    #[test]
    fn test_type_mismatch() {
        assert!(!contains(&json!("1"), &json!(1)));
        assert!(!contains(&json!({"a": 1}), &json!([1])));
        assert!(!contains(&json!(null), &json!({"a": 1})));
    }

    #[test]
    fn test_any_element_contains() {
        let list = json!([{"key": "a"}, {"key": "b", "name": "B"}]);
        assert!(any_element_contains(&list, &json!({"key": "b"})));
        assert!(!any_element_contains(&list, &json!({"key": "c"})));
        assert!(!any_element_contains(&json!({"key": "b"}), &json!({"key": "b"})));
    }
}
