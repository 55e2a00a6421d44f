use super::*;
use crate::value::compare::{text_contains, TextMode};
use std::cmp::Ordering;

#[test]
fn json_numbers_split_into_int_and_float() {
    let v: Value = serde_json::json!(42).into();
    assert_eq!(v, Value::Int(42));

    let v: Value = serde_json::json!(1.5).into();
    assert_eq!(v, Value::Float(Float64::try_new(1.5).unwrap()));
}

#[test]
fn json_round_trips_through_value() {
    let json = serde_json::json!(["a", 2, null, true]);
    let value: Value = json.clone().into();
    let back: serde_json::Value = value.into();

    assert_eq!(back, json);
}

#[test]
fn nested_objects_become_text_cells() {
    let v: Value = serde_json::json!({"a": 1}).into();
    assert_eq!(v, Value::Text(r#"{"a":1}"#.to_string()));
}

#[test]
fn literal_parsing_matches_user_typed_shapes() {
    assert_eq!(Value::from_literal("true"), Value::Bool(true));
    assert_eq!(Value::from_literal("100000"), Value::Int(100_000));
    assert_eq!(
        Value::from_literal("2.5"),
        Value::Float(Float64::try_new(2.5).unwrap())
    );
    assert_eq!(
        Value::from_literal("Backend"),
        Value::Text("Backend".to_string())
    );
}

#[test]
fn numeric_comparison_crosses_int_and_float() {
    assert_eq!(
        compare_order(&Value::Int(2), &Value::Float(Float64::try_new(2.5).unwrap())),
        Some(Ordering::Less)
    );
    assert_eq!(
        compare_eq(&Value::Int(3), &Value::Float(Float64::try_new(3.0).unwrap())),
        Some(true)
    );
}

#[test]
fn cross_family_comparisons_are_undefined() {
    assert_eq!(compare_eq(&Value::Text("5".into()), &Value::Int(5)), None);
    assert_eq!(compare_order(&Value::Null, &Value::Int(0)), None);
    assert_eq!(
        compare_order(&Value::Bool(true), &Value::Text("true".into())),
        None
    );
}

#[test]
fn canonical_order_puts_null_first() {
    let mut values = vec![
        Value::Text("b".into()),
        Value::Null,
        Value::Int(1),
        Value::Bool(false),
    ];
    values.sort_by(Value::cmp_canonical);

    assert_eq!(
        values,
        vec![
            Value::Null,
            Value::Bool(false),
            Value::Int(1),
            Value::Text("b".into()),
        ]
    );
}

#[test]
fn text_containment_stringifies_both_sides() {
    assert!(text_contains(
        &Value::Int(100_500),
        &Value::Text("005".into()),
        TextMode::Cs
    ));
    assert!(text_contains(
        &Value::Text("Engineering".into()),
        &Value::Text("GINEER".into()),
        TextMode::Ci
    ));
    assert!(!text_contains(
        &Value::Text("Engineering".into()),
        &Value::Text("GINEER".into()),
        TextMode::Cs
    ));
}
