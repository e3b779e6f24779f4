//! Integration tests for sequence validation.

use pathwise::{validate, JsonPath, Schema, SchemaLike};
use serde_json::json;

#[test]
fn test_empty_array_succeeds_for_any_item_validator() {
    let schema = Schema::array(Schema::literal("never"));
    let items = validate(&schema, &json!([])).into_result().unwrap();
    assert!(items.is_empty());

    let value = schema.validate_to_value(&json!([]), &JsonPath::root());
    assert_eq!(value.into_result().unwrap(), json!([]));
}

#[test]
fn test_all_item_errors_in_index_order() {
    let schema = Schema::array(Schema::string().min_len(2));
    let errors = validate(&schema, &json!(["ok", "", 3, "fine", "x"]))
        .into_result()
        .unwrap_err();
    assert_eq!(errors.paths(), vec!["[1]", "[2]", "[4]"]);
}

#[test]
fn test_array_of_records() {
    let schema = Schema::object().field(
        "users",
        Schema::array(
            Schema::object()
                .required("email", Schema::string())
                .field("age", Schema::integer().non_negative()),
        ),
    );

    let input = json!({
        "users": [
            {"email": "a@x", "age": 1},
            {"age": -1},
            {"email": "c@x", "age": 2.5}
        ]
    });
    let errors = validate(&schema, &input).into_result().unwrap_err();
    assert_eq!(
        errors.paths(),
        vec!["users[1].email", "users[1].age", "users[2].age"]
    );
}

#[test]
fn test_nested_arrays() {
    let schema = Schema::array(Schema::array(Schema::number()));
    let errors = validate(&schema, &json!([[1, 2], [3, "x"]]))
        .into_result()
        .unwrap_err();
    assert_eq!(errors.paths(), vec!["[1][1]"]);
}

#[test]
fn test_length_bounds() {
    let schema = Schema::array(Schema::number()).min_len(1).max_len(2);
    assert!(validate(&schema, &json!([1])).is_success());

    let errors = validate(&schema, &json!([])).into_result().unwrap_err();
    assert_eq!(errors.first().code, "min_length");

    let errors = validate(&schema, &json!([1, 2, 3])).into_result().unwrap_err();
    assert_eq!(errors.first().code, "max_length");
    assert!(errors.first().path.is_root());
}

#[test]
fn test_unique_items() {
    let schema = Schema::array(Schema::number()).unique();
    assert!(validate(&schema, &json!([1, 2, 3])).is_success());

    let errors = validate(&schema, &json!([1, 2, 1])).into_result().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, "unique");
}

#[test]
fn test_non_array_input() {
    let schema = Schema::array(Schema::number());
    let errors = validate(&schema, &json!({"0": 1})).into_result().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().message, "Expected an array");
}
