//! Exact-value leaves: a single literal, or membership in a set of strings.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::SchemaLike;
use super::type_error;

/// Accepts exactly one JSON value.
///
/// Handy as the discriminant field of a variant schema:
///
/// ```rust
/// use pathwise::{validate, Schema};
/// use serde_json::json;
///
/// let kind = Schema::literal("image");
/// assert!(validate(&kind, &json!("image")).is_success());
/// assert!(validate(&kind, &json!("text")).is_failure());
/// ```
#[derive(Clone)]
pub struct LiteralSchema {
    expected: Value,
}

impl LiteralSchema {
    /// Creates a schema accepting only `expected`.
    pub fn new(expected: impl Into<Value>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl SchemaLike for LiteralSchema {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        if *value == self.expected {
            Validation::Success(value.clone())
        } else {
            Validation::Failure(SchemaErrors::single(
                SchemaError::new(path.clone(), format!("Expected {}", self.expected))
                    .with_code("invalid_literal")
                    .with_expected(self.expected.to_string())
                    .with_got(value.to_string()),
            ))
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        SchemaLike::validate(self, value, path)
    }
}

/// Accepts a string from a fixed list.
#[derive(Clone)]
pub struct EnumSchema {
    allowed: Vec<String>,
    message: Option<String>,
}

impl EnumSchema {
    /// Creates a schema accepting any of `allowed`.
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            message: None,
        }
    }

    /// Overrides the membership failure message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl SchemaLike for EnumSchema {
    type Output = String;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<String, SchemaErrors> {
        let s = match value.as_str() {
            Some(s) => s,
            None => {
                return Validation::Failure(type_error(
                    path,
                    None,
                    "Expected a string",
                    "string",
                    value,
                ))
            }
        };
        if self.allowed.iter().any(|a| a == s) {
            return Validation::Success(s.to_string());
        }
        let expected = self.allowed.join(", ");
        let message = self
            .message
            .clone()
            .unwrap_or_else(|| format!("Expected one of: {}", expected));
        Validation::Failure(SchemaErrors::single(
            SchemaError::new(path.clone(), message)
                .with_code("invalid_enum")
                .with_expected(expected)
                .with_got(s),
        ))
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        SchemaLike::validate(self, value, path).map(Value::String)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literal_exact_match() {
        let schema = LiteralSchema::new(42);
        assert!(schema.validate_to_value(&json!(42), &JsonPath::root()).is_success());

        let errors = schema
            .validate_to_value(&json!("42"), &JsonPath::root())
            .into_result()
            .unwrap_err();
        assert_eq!(errors.first().code, "invalid_literal");
        assert_eq!(errors.first().message, "Expected 42");
    }

    #[test]
    fn test_enum_membership() {
        let schema = EnumSchema::new(["admin", "user"]);
        assert!(schema.validate_to_value(&json!("user"), &JsonPath::root()).is_success());

        let errors = schema
            .validate_to_value(&json!("root"), &JsonPath::root())
            .into_result()
            .unwrap_err();
        assert_eq!(errors.first().code, "invalid_enum");
        assert_eq!(errors.first().message, "Expected one of: admin, user");
    }
}
