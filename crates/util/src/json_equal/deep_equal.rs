use crate::value::{Value, ValueError};

/// Performs a deep equality check between two values.
///
/// Values of different kinds are never equal, even when one could be coerced
/// into the other. Sequences compare element-by-element in order; mappings
/// compare key-by-key regardless of key order. Numbers use exact equality.
///
/// The traversal keeps its own work stack, so nesting depth is bounded by
/// memory rather than by the call stack. Dropping a [`Value`] is likewise
/// non-recursive.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use structeq_util::{deep_equal, Value};
///
/// let a = Value::try_from(json!({"foo": [1, 2, 3]})).unwrap();
/// let b = Value::try_from(json!({"foo": [1, 2, 3]})).unwrap();
/// let c = Value::try_from(json!({"foo": [1, 2, 4]})).unwrap();
///
/// assert!(deep_equal(&a, &b));
/// assert!(!deep_equal(&a, &c));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    let mut pending: Vec<(&Value, &Value)> = vec![(a, b)];

    while let Some((a, b)) = pending.pop() {
        match (a, b) {
            (Value::Null, Value::Null) => {}
            (Value::Bool(a), Value::Bool(b)) => {
                if a != b {
                    return false;
                }
            }
            (Value::Number(a), Value::Number(b)) => {
                if a != b {
                    return false;
                }
            }
            (Value::String(a), Value::String(b)) => {
                if a != b {
                    return false;
                }
            }

            // Sequences
            (Value::Sequence(seq_a), Value::Sequence(seq_b)) => {
                if seq_a.len() != seq_b.len() {
                    return false;
                }
                // Reversed so index 0 is popped first.
                pending.extend(seq_a.iter().zip(seq_b.iter()).rev());
            }

            // Mappings
            (Value::Mapping(map_a), Value::Mapping(map_b)) => {
                if map_a.len() != map_b.len() {
                    return false;
                }
                let mark = pending.len();
                for (key, val_a) in map_a {
                    match map_b.get(key) {
                        Some(val_b) => pending.push((val_a, val_b)),
                        None => return false,
                    }
                }
                pending[mark..].reverse();
            }

            // Different kinds are never equal
            _ => return false,
        }
    }

    true
}

/// Compares two `serde_json` documents under [`deep_equal`] semantics.
///
/// Unlike `serde_json::Value`'s own `PartialEq`, `1` and `1.0` compare equal
/// here. Fails only if a number cannot be represented as a finite double.
pub fn deep_equal_json(a: &serde_json::Value, b: &serde_json::Value) -> Result<bool, ValueError> {
    Ok(deep_equal(&Value::try_from(a)?, &Value::try_from(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(doc: serde_json::Value) -> Value {
        Value::try_from(doc).unwrap()
    }

    fn eq(a: serde_json::Value, b: serde_json::Value) -> bool {
        deep_equal(&v(a), &v(b))
    }

    // Scalar tests
    #[test]
    fn test_equal_numbers() {
        assert!(eq(json!(1), json!(1)));
    }

    #[test]
    fn test_not_equal_numbers() {
        assert!(!eq(json!(1), json!(2)));
    }

    #[test]
    fn test_integer_and_float_spelling_equal() {
        assert!(eq(json!(1), json!(1.0)));
    }

    #[test]
    fn test_number_and_string_not_equal() {
        assert!(!eq(json!(1), json!("1")));
    }

    #[test]
    fn test_number_and_array_not_equal() {
        assert!(!eq(json!(1), json!([])));
    }

    #[test]
    fn test_zero_and_null_not_equal() {
        assert!(!eq(json!(0), json!(null)));
        assert!(!eq(json!(null), json!(0)));
    }

    #[test]
    fn test_equal_strings() {
        assert!(eq(json!("a"), json!("a")));
    }

    #[test]
    fn test_not_equal_strings() {
        assert!(!eq(json!("a"), json!("b")));
    }

    #[test]
    fn test_empty_string_and_null_not_equal() {
        assert!(!eq(json!(""), json!(null)));
    }

    #[test]
    fn test_null_equal_null() {
        assert!(eq(json!(null), json!(null)));
    }

    #[test]
    fn test_not_equal_booleans() {
        assert!(eq(json!(true), json!(true)));
        assert!(eq(json!(false), json!(false)));
        assert!(!eq(json!(true), json!(false)));
    }

    #[test]
    fn test_one_and_true_not_equal() {
        assert!(!eq(json!(1), json!(true)));
    }

    #[test]
    fn test_zero_and_false_not_equal() {
        assert!(!eq(json!(0), json!(false)));
    }

    // Mapping tests
    #[test]
    fn test_empty_mappings_equal() {
        assert!(eq(json!({}), json!({})));
    }

    #[test]
    fn test_equal_mappings_different_order() {
        assert!(eq(json!({"a": 1, "b": 2}), json!({"b": 2, "a": 1})));
    }

    #[test]
    fn test_mapping_with_extra_key_not_equal() {
        assert!(!eq(json!({"a": 1}), json!({"a": 1, "b": 2})));
        assert!(!eq(json!({"a": 1, "b": 2}), json!({"a": 1})));
    }

    #[test]
    fn test_mappings_with_different_keys_not_equal() {
        assert!(!eq(
            json!({"a": 1, "b": "2", "c": 3}),
            json!({"a": 1, "b": "2", "d": 3})
        ));
    }

    #[test]
    fn test_mappings_with_different_values_not_equal() {
        assert!(!eq(
            json!({"a": 1, "b": "2", "c": 3}),
            json!({"a": 1, "b": "2", "c": 4})
        ));
    }

    #[test]
    fn test_empty_mapping_and_sequence_not_equal() {
        assert!(!eq(json!({}), json!([])));
    }

    // Sequence tests
    #[test]
    fn test_empty_sequences_equal() {
        assert!(eq(json!([]), json!([])));
    }

    #[test]
    fn test_equal_sequences() {
        assert!(eq(json!([1, 2, 3]), json!([1, 2, 3])));
    }

    #[test]
    fn test_sequences_with_different_item_not_equal() {
        assert!(!eq(json!([1, 2, 3]), json!([1, 2, 4])));
    }

    #[test]
    fn test_sequence_order_matters() {
        assert!(!eq(json!([1, 2, 3]), json!([3, 2, 1])));
        assert!(!eq(json!([1, 2]), json!([2, 1])));
    }

    #[test]
    fn test_sequences_with_different_length_not_equal() {
        assert!(!eq(json!([1, 2, 3]), json!([1, 2])));
    }

    #[test]
    fn test_sequences_of_mappings() {
        assert!(eq(
            json!([{"a": "a"}, {"b": "b"}]),
            json!([{"a": "a"}, {"b": "b"}])
        ));
        assert!(!eq(
            json!([{"a": "a"}, {"b": "b"}]),
            json!([{"a": "a"}, {"b": "c"}])
        ));
    }

    // Nested tests
    #[test]
    fn test_nested_user_record() {
        let a = json!({"user": {"name": "John", "age": 30}, "scores": [85, 90, 78]});
        let b = json!({"user": {"name": "John", "age": 30}, "scores": [85, 90, 78]});
        let c = json!({"user": {"name": "John", "age": 31}, "scores": [85, 90, 78]});
        assert!(eq(a.clone(), b));
        assert!(!eq(a, c));
    }

    #[test]
    fn test_product_records() {
        let product = json!({
            "name": "Product A",
            "price": 29.99,
            "details": {"color": "red", "size": "M"}
        });
        assert!(eq(product.clone(), product));
    }

    #[test]
    fn test_price_orderings() {
        let correct = json!([7.99, 9.99, 15.99, 15.99, 29.99, 49.99]);
        let wrong = json!([7.99, 9.99, 15.99, 29.99, 49.99, 15.99]);
        assert!(!eq(correct, wrong));
    }

    #[test]
    fn test_big_mapping() {
        let a = json!({
            "prop1": "value1",
            "prop2": "value2",
            "prop4": {
                "subProp1": "sub value1",
                "subProp2": {
                    "subSubProp1": "sub sub value1",
                    "subSubProp2": [1, 2, {"prop2": 1, "prop": 2}, 4, 5]
                }
            },
            "prop5": 1000
        });
        let b = json!({
            "prop5": 1000,
            "prop1": "value1",
            "prop2": "value2",
            "prop4": {
                "subProp2": {
                    "subSubProp1": "sub sub value1",
                    "subSubProp2": [1, 2, {"prop2": 1, "prop": 2}, 4, 5]
                },
                "subProp1": "sub value1"
            }
        });
        assert!(eq(a, b));
    }

    fn nest(depth: usize, leaf: i32) -> Value {
        let mut value = Value::from(leaf);
        for i in 0..depth {
            value = if i % 64 != 0 {
                Value::Sequence(vec![value])
            } else {
                let mut map = crate::Mapping::new();
                map.insert("next".to_owned(), value);
                Value::Mapping(map)
            };
        }
        value
    }

    // Far deeper than a recursive comparison survives on a test thread.
    #[test]
    fn test_deeply_nested_values() {
        let depth = 200_000;
        assert!(deep_equal(&nest(depth, 1), &nest(depth, 1)));
        assert!(!deep_equal(&nest(depth, 1), &nest(depth, 2)));
        assert!(!deep_equal(&nest(depth, 1), &nest(depth - 1, 1)));
    }

    #[test]
    fn test_deep_equal_json() {
        assert_eq!(deep_equal_json(&json!({"a": [1]}), &json!({"a": [1.0]})), Ok(true));
        assert_eq!(deep_equal_json(&json!({"a": [1]}), &json!({"a": ["1"]})), Ok(false));
    }
}
