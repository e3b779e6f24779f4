//! Integration tests for the schema registry.

use pathwise::{RegistryError, Schema, SchemaRegistry};
use serde_json::json;

#[test]
fn test_register_and_validate() {
    let registry = SchemaRegistry::new();
    registry
        .register(
            "User",
            Schema::object()
                .required("name", Schema::string().min_len(1))
                .field("age", Schema::integer().positive()),
        )
        .unwrap();

    let result = registry
        .validate("User", &json!({"name": "Alice", "age": 30}))
        .unwrap();
    assert!(result.is_success());

    let result = registry
        .validate("User", &json!({"name": "", "age": 0}))
        .unwrap();
    assert_eq!(result.into_result().unwrap_err().len(), 2);
}

#[test]
fn test_duplicate_registration() {
    let registry = SchemaRegistry::new();
    registry.register("Email", Schema::string()).unwrap();

    let err = registry.register("Email", Schema::number()).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateName(ref name) if name == "Email"));

    // The original registration is untouched.
    let result = registry.validate("Email", &json!("a@b")).unwrap();
    assert!(result.is_success());
}

#[test]
fn test_unknown_schema_name() {
    let registry = SchemaRegistry::new();
    let err = registry.validate("Nope", &json!({})).unwrap_err();
    assert_eq!(err.to_string(), "schema 'Nope' not found");
}

#[test]
fn test_references_between_schemas() {
    let registry = SchemaRegistry::new();
    registry.register("UserId", Schema::integer().positive()).unwrap();
    registry
        .register(
            "Order",
            Schema::object()
                .field("owner", registry.reference("UserId"))
                .field("items", Schema::array(registry.reference("UserId")).non_empty()),
        )
        .unwrap();

    let result = registry
        .validate("Order", &json!({"owner": -1, "items": [1, 0]}))
        .unwrap();
    let errors = result.into_result().unwrap_err();
    assert_eq!(errors.paths(), vec!["owner", "items[1]"]);
}

#[test]
fn test_unresolved_refs() {
    let registry = SchemaRegistry::new();
    registry
        .register(
            "Post",
            Schema::object()
                .field("author", registry.reference("User"))
                .field("tags", Schema::array(registry.reference("Tag")))
                .field("editor", Schema::optional(registry.reference("User"))),
        )
        .unwrap();

    assert_eq!(registry.unresolved_refs(), vec!["Tag", "User"]);

    let result = registry
        .validate("Post", &json!({"author": {}, "tags": []}))
        .unwrap();
    let errors = result.into_result().unwrap_err();
    assert_eq!(errors.first().code, "missing_reference");
    assert_eq!(errors.first().path.to_string(), "author");
}

#[test]
fn test_reference_outlives_registry() {
    let reference = {
        let registry = SchemaRegistry::new();
        registry.register("Name", Schema::string()).unwrap();
        registry.reference("Name")
    };

    let errors = pathwise::validate(&reference, &json!("x"))
        .into_result()
        .unwrap_err();
    assert_eq!(errors.first().code, "missing_reference");
}
