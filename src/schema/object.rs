//! Object aggregation.
//!
//! [`ObjectSchema`] validates a record against a fixed set of named field
//! validators. Aggregation is exhaustive: every declared field is checked and
//! every failure is reported, each at the field's own path.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::presence::{DefaultSchema, OptionalSchema, RequiredSchema};
use super::traits::{SchemaLike, ValueValidator};
use super::type_error;

/// How keys that the schema does not declare are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeys {
    /// Each unknown key is an error at its own path.
    #[default]
    Strict,
    /// Unknown keys are dropped from the output.
    Strip,
    /// Unknown keys are copied to the output unvalidated.
    Passthrough,
}

/// A schema for validating records.
///
/// Fields are checked in declaration order. An absent key is handed to its
/// field validator as `null`; wrap the validator with
/// [`Schema::optional`](crate::Schema::optional) to accept absence, or with
/// [`Schema::required`](crate::Schema::required) for a dedicated message.
///
/// # Example
///
/// ```rust
/// use pathwise::{validate, Schema};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .required("name", Schema::string().min_len(1))
///     .field("age", Schema::number().int().positive())
///     .optional("email", Schema::string());
///
/// let result = validate(&schema, &json!({"name": "Alice", "age": 30}));
/// assert_eq!(serde_json::Value::Object(result.into_result().unwrap()), json!({"name": "Alice", "age": 30}));
///
/// // Every failing field is reported, plus the unexpected key.
/// let result = validate(&schema, &json!({"name": "", "age": -1, "admin": true}));
/// let errors = result.into_result().unwrap_err();
/// assert_eq!(errors.paths(), vec!["admin", "name", "age"]);
/// ```
pub struct ObjectSchema {
    fields: IndexMap<String, Arc<dyn ValueValidator>>,
    unknown_keys: UnknownKeys,
    type_error_message: Option<String>,
}

impl ObjectSchema {
    /// Creates a strict object schema with no fields.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            unknown_keys: UnknownKeys::Strict,
            type_error_message: None,
        }
    }

    /// Declares a field validated by `schema`.
    ///
    /// Declaring the same name twice replaces the earlier validator but keeps
    /// its position.
    pub fn field<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.fields.insert(name.into(), Arc::new(schema));
        self
    }

    /// Declares a field that must be present and non-null.
    pub fn required<S>(self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.field(name, RequiredSchema::new(schema))
    }

    /// Declares a field that may be absent or null.
    pub fn optional<S>(self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.field(name, OptionalSchema::new(schema))
    }

    /// Declares a field that falls back to `default` when absent or null.
    ///
    /// The default is inserted as-is; it is not run through `schema`.
    pub fn default<S>(self, name: impl Into<String>, schema: S, default: Value) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.field(name, DefaultSchema::new(schema, default))
    }

    /// Sets the unknown-key policy.
    pub fn unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.unknown_keys = policy;
        self
    }

    /// Shorthand for `unknown_keys(UnknownKeys::Strict)`.
    pub fn strict(self) -> Self {
        self.unknown_keys(UnknownKeys::Strict)
    }

    /// Shorthand for `unknown_keys(UnknownKeys::Strip)`.
    pub fn strip(self) -> Self {
        self.unknown_keys(UnknownKeys::Strip)
    }

    /// Shorthand for `unknown_keys(UnknownKeys::Passthrough)`.
    pub fn passthrough(self) -> Self {
        self.unknown_keys(UnknownKeys::Passthrough)
    }

    /// Sets the message used when the value is not a record.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Returns the declared field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Validates a value against this schema.
    ///
    /// Returns the output record on success. It contains exactly the declared
    /// keys that validated (plus unknown keys under `Passthrough`). A key that
    /// was absent from the input and validated to `null` stays absent.
    pub fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
    ) -> Validation<Map<String, Value>, SchemaErrors> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => {
                return Validation::Failure(type_error(
                    path,
                    self.type_error_message.as_deref(),
                    "Expected an object",
                    "object",
                    value,
                ))
            }
        };

        let mut errors = Vec::new();
        let mut validated = Map::new();

        if self.unknown_keys == UnknownKeys::Strict {
            for key in obj.keys().filter(|k| !self.fields.contains_key(*k)) {
                errors.push(
                    SchemaError::new(path.push_field(key), format!("Unexpected field '{}'", key))
                        .with_code("unrecognized_key"),
                );
            }
        }

        for (name, schema) in &self.fields {
            let field_path = path.push_field(name);
            let input = obj.get(name);

            match schema.validate_value(input.unwrap_or(&Value::Null), &field_path) {
                Validation::Success(Value::Null) if input.is_none() => {}
                Validation::Success(v) => {
                    validated.insert(name.clone(), v);
                }
                Validation::Failure(e) => errors.extend(e),
            }
        }

        if self.unknown_keys == UnknownKeys::Passthrough {
            for (key, v) in obj.iter().filter(|(k, _)| !self.fields.contains_key(*k)) {
                validated.insert(key.clone(), v.clone());
            }
        }

        match SchemaErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(validated),
        }
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for ObjectSchema {
    type Output = Map<String, Value>;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate(value, path).map(Value::Object)
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        for schema in self.fields.values() {
            schema.collect_value_refs(refs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NumberSchema, StringSchema};
    use serde_json::json;

    fn unwrap_success<T, E: std::fmt::Debug>(v: Validation<T, E>) -> T {
        v.into_result().unwrap()
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_empty_object_schema() {
        let schema = ObjectSchema::new();
        assert!(schema.validate(&json!({}), &JsonPath::root()).is_success());
    }

    #[test]
    fn test_rejects_non_object() {
        let schema = ObjectSchema::new();
        for value in [json!("x"), json!(42), json!(null), json!([1, 2])] {
            let errors = unwrap_failure(schema.validate(&value, &JsonPath::root()));
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.first().message, "Expected an object");
            assert_eq!(errors.first().code, "invalid_type");
            assert!(errors.first().path.is_root());
        }
    }

    #[test]
    fn test_type_error_uses_current_path() {
        let schema = ObjectSchema::new();
        let path = JsonPath::root().push_field("address");
        let errors = unwrap_failure(schema.validate(&json!(1), &path));
        assert_eq!(errors.first().path, path);
    }

    #[test]
    fn test_absent_field_is_validated_as_null() {
        let schema = ObjectSchema::new().field("name", StringSchema::new());
        let errors = unwrap_failure(schema.validate(&json!({}), &JsonPath::root()));
        assert_eq!(errors.first().path.to_string(), "name");
        assert_eq!(errors.first().got, Some("null".to_string()));
    }

    #[test]
    fn test_strict_reports_every_extra_key() {
        let schema = ObjectSchema::new().field("name", StringSchema::new());
        let errors = unwrap_failure(
            schema.validate(&json!({"name": "a", "x": 1, "y": 2}), &JsonPath::root()),
        );
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.paths(), vec!["x", "y"]);
        assert!(errors.iter().all(|e| e.code == "unrecognized_key"));
        assert_eq!(errors.first().message, "Unexpected field 'x'");
    }

    #[test]
    fn test_extra_key_errors_precede_field_errors() {
        let schema = ObjectSchema::new().field("name", StringSchema::new());
        let errors =
            unwrap_failure(schema.validate(&json!({"name": 1, "extra": 1}), &JsonPath::root()));
        assert_eq!(errors.paths(), vec!["extra", "name"]);
    }

    #[test]
    fn test_strip_drops_extra_keys() {
        let schema = ObjectSchema::new().field("name", StringSchema::new()).strip();
        let obj =
            unwrap_success(schema.validate(&json!({"name": "a", "extra": 1}), &JsonPath::root()));
        assert_eq!(Value::Object(obj), json!({"name": "a"}));
    }

    #[test]
    fn test_passthrough_copies_extra_keys() {
        let schema = ObjectSchema::new()
            .field("name", StringSchema::new())
            .passthrough();
        let obj =
            unwrap_success(schema.validate(&json!({"name": "a", "extra": 1}), &JsonPath::root()));
        assert_eq!(Value::Object(obj), json!({"name": "a", "extra": 1}));
    }

    #[test]
    fn test_error_accumulation_in_schema_order() {
        let schema = ObjectSchema::new()
            .field("z", StringSchema::new())
            .field("a", NumberSchema::new())
            .field("m", StringSchema::new());

        let errors = unwrap_failure(
            schema.validate(&json!({"m": 1, "a": "x", "z": 2}), &JsonPath::root()),
        );
        assert_eq!(errors.paths(), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_optional_absent_stays_absent() {
        let schema = ObjectSchema::new().optional("nickname", StringSchema::new());

        let obj = unwrap_success(schema.validate(&json!({}), &JsonPath::root()));
        assert!(!obj.contains_key("nickname"));

        let obj = unwrap_success(schema.validate(&json!({"nickname": null}), &JsonPath::root()));
        assert_eq!(obj.get("nickname"), Some(&Value::Null));
    }

    #[test]
    fn test_required_field_message() {
        let schema = ObjectSchema::new().required("name", StringSchema::new());
        let errors = unwrap_failure(schema.validate(&json!({}), &JsonPath::root()));
        assert_eq!(errors.first().message, "Field is required");
        assert_eq!(errors.first().code, "required");
    }

    #[test]
    fn test_default_field() {
        let schema = ObjectSchema::new().default("role", StringSchema::new(), json!("user"));

        let obj = unwrap_success(schema.validate(&json!({}), &JsonPath::root()));
        assert_eq!(obj.get("role"), Some(&json!("user")));

        let obj = unwrap_success(schema.validate(&json!({"role": "admin"}), &JsonPath::root()));
        assert_eq!(obj.get("role"), Some(&json!("admin")));
    }

    #[test]
    fn test_nested_path_tracking() {
        let inner = ObjectSchema::new().field("value", NumberSchema::new().positive());
        let middle = ObjectSchema::new().field("inner", inner);
        let outer = ObjectSchema::new().field("middle", middle);

        let errors = unwrap_failure(outer.validate(
            &json!({"middle": {"inner": {"value": -5}}}),
            &JsonPath::root(),
        ));
        assert_eq!(errors.first().path.to_string(), "middle.inner.value");
    }

    #[test]
    fn test_custom_type_error_message() {
        let schema = ObjectSchema::new().error("must be a user object");
        let errors = unwrap_failure(schema.validate(&json!("nope"), &JsonPath::root()));
        assert_eq!(errors.first().message, "must be a user object");
    }

    #[test]
    fn test_output_follows_schema_order() {
        let schema = ObjectSchema::new()
            .field("b", NumberSchema::new())
            .field("a", NumberSchema::new());
        let obj = unwrap_success(schema.validate(&json!({"a": 1, "b": 2}), &JsonPath::root()));
        let keys: Vec<_> = obj.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
