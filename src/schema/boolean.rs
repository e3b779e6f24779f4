//! Boolean leaves.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::SchemaLike;
use super::type_error;

/// A leaf validating booleans, optionally requiring a specific value.
///
/// ```rust
/// use pathwise::{validate, Schema};
/// use serde_json::json;
///
/// let accepted = Schema::boolean().equals(true).error("terms must be accepted");
///
/// assert!(validate(&accepted, &json!(true)).is_success());
/// let errors = validate(&accepted, &json!(false)).into_result().unwrap_err();
/// assert_eq!(errors.first().message, "terms must be accepted");
/// ```
#[derive(Clone, Default)]
pub struct BooleanSchema {
    expected: Option<bool>,
    message: Option<String>,
    type_error_message: Option<String>,
}

impl BooleanSchema {
    /// Creates a schema accepting any boolean.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the value to equal `expected`.
    pub fn equals(mut self, expected: bool) -> Self {
        self.expected = Some(expected);
        self
    }

    /// Sets the message for a failed `equals`, or the type message when no
    /// `equals` has been configured.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if self.expected.is_some() {
            self.message = Some(message.into());
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: &Value, path: &JsonPath) -> Validation<bool, SchemaErrors> {
        let b = match value.as_bool() {
            Some(b) => b,
            None => {
                return Validation::Failure(type_error(
                    path,
                    self.type_error_message.as_deref(),
                    "Expected a boolean",
                    "boolean",
                    value,
                ))
            }
        };
        check_equals(self.expected, self.message.as_deref(), b, path)
    }
}

impl SchemaLike for BooleanSchema {
    type Output = bool;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<bool, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate(value, path).map(Value::Bool)
    }
}

/// A leaf turning `"true"` / `"false"` strings into booleans.
///
/// Matching is ASCII case-insensitive and ignores surrounding whitespace.
#[derive(Clone, Default)]
pub struct BooleanStringSchema {
    expected: Option<bool>,
}

impl BooleanStringSchema {
    /// Creates a schema accepting either boolean spelling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the parsed value to equal `expected`.
    pub fn equals(mut self, expected: bool) -> Self {
        self.expected = Some(expected);
        self
    }
}

impl SchemaLike for BooleanStringSchema {
    type Output = bool;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<bool, SchemaErrors> {
        let s = match value.as_str() {
            Some(s) => s.trim(),
            None => {
                return Validation::Failure(type_error(
                    path,
                    None,
                    "Expected \"true\" or \"false\"",
                    "string",
                    value,
                ))
            }
        };
        let parsed = if s.eq_ignore_ascii_case("true") {
            true
        } else if s.eq_ignore_ascii_case("false") {
            false
        } else {
            return Validation::Failure(SchemaErrors::single(
                SchemaError::new(path.clone(), "Expected \"true\" or \"false\"")
                    .with_code("invalid_type")
                    .with_expected("\"true\" or \"false\"")
                    .with_got(s),
            ));
        };
        check_equals(self.expected, None, parsed, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        SchemaLike::validate(self, value, path).map(Value::Bool)
    }
}

fn check_equals(
    expected: Option<bool>,
    message: Option<&str>,
    actual: bool,
    path: &JsonPath,
) -> Validation<bool, SchemaErrors> {
    match expected {
        Some(expected) if expected != actual => Validation::Failure(SchemaErrors::single(
            SchemaError::new(
                path.clone(),
                message
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("value must be {}", expected)),
            )
            .with_code("not_equal")
            .with_expected(expected.to_string())
            .with_got(actual.to_string()),
        )),
        _ => Validation::Success(actual),
    }
}
