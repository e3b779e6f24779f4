//! Integration tests for JsonPath construction and rendering.

use pathwise::{validate, JsonPath, PathSegment, Schema};
use serde_json::json;

#[test]
fn test_root_path_renders_empty() {
    let path = JsonPath::root();
    assert!(path.is_root());
    assert_eq!(path.to_string(), "");
    assert!(path.to_segments().is_empty());
}

#[test]
fn test_mixed_segments_render() {
    let path = JsonPath::root()
        .push_field("users")
        .push_index(0)
        .push_field("address")
        .push_field("zip");
    assert_eq!(path.to_string(), "users[0].address.zip");
    assert_eq!(path.len(), 4);
}

#[test]
fn test_leading_index_has_no_dot() {
    let path = JsonPath::root().push_index(3).push_field("id");
    assert_eq!(path.to_string(), "[3].id");
}

#[test]
fn test_consecutive_indices() {
    let path = JsonPath::root().push_field("grid").push_index(1).push_index(2);
    assert_eq!(path.to_string(), "grid[1][2]");
}

#[test]
fn test_extending_does_not_mutate_parent() {
    let parent = JsonPath::root().push_field("items");
    let first = parent.push_index(0);
    let second = parent.push_index(1);

    assert_eq!(parent.to_string(), "items");
    assert_eq!(first.to_string(), "items[0]");
    assert_eq!(second.to_string(), "items[1]");
}

#[test]
fn test_parent_and_last() {
    let path = JsonPath::root().push_field("a").push_index(2);
    assert_eq!(path.last(), Some(&PathSegment::Index(2)));
    assert_eq!(path.parent(), Some(JsonPath::root().push_field("a")));
    assert_eq!(JsonPath::root().parent(), None);
}

#[test]
fn test_path_round_trip_through_validation() {
    let schema = Schema::object().field(
        "a",
        Schema::array(Schema::object().field("b", Schema::number().positive())),
    );

    let input = json!({"a": [{"b": 1}, {"b": 2}, {"b": -3}]});
    let errors = validate(&schema, &input).into_result().unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().path.to_segments(), vec!["a", "2", "b"]);
    assert_eq!(errors.first().path.to_string(), "a[2].b");
}

#[test]
fn test_paths_compare_by_segments() {
    let built = JsonPath::root().push_field("x").push_field("y");
    let collected: JsonPath = ["x", "y"].into_iter().collect();
    assert_eq!(built, collected);
}
