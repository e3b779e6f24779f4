//! String leaf validation.

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::SchemaLike;
use super::type_error;

#[derive(Clone)]
enum StringConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
    Pattern {
        regex: Regex,
        message: Option<String>,
    },
}

/// A leaf validating string values.
///
/// Constraints configured on one `StringSchema` are independent predicates:
/// every violated constraint is reported, all at the same path. Use
/// [`Schema::pipe`](crate::Schema::pipe) when later checks should only run
/// after earlier ones pass.
///
/// # Example
///
/// ```rust
/// use pathwise::{validate, Schema};
/// use serde_json::json;
///
/// let schema = Schema::string()
///     .min_len(3)
///     .pattern(r"^[a-z]+$")
///     .unwrap();
///
/// let errors = validate(&schema, &json!("AB")).into_result().unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
#[derive(Clone)]
pub struct StringSchema {
    constraints: Vec<StringConstraint>,
    type_error_message: Option<String>,
}

impl StringSchema {
    /// Creates a new string schema with no constraints.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// Requires at least `min` characters (Unicode scalar values).
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(StringConstraint::MinLength { min, message: None });
        self
    }

    /// Requires at most `max` characters (Unicode scalar values).
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(StringConstraint::MaxLength { max, message: None });
        self
    }

    /// Rejects the empty string.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Requires the string to match `pattern`.
    ///
    /// Fails at construction time if the pattern does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.constraints.push(StringConstraint::Pattern {
            regex,
            message: None,
        });
        Ok(self)
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// With no constraints yet, sets the message used when the value is not
    /// a string.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.constraints.last_mut() {
            Some(StringConstraint::MinLength { message: m, .. })
            | Some(StringConstraint::MaxLength { message: m, .. })
            | Some(StringConstraint::Pattern { message: m, .. }) => *m = Some(message.into()),
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: &Value, path: &JsonPath) -> Validation<String, SchemaErrors> {
        let s = match value.as_str() {
            Some(s) => s,
            None => {
                return Validation::Failure(type_error(
                    path,
                    self.type_error_message.as_deref(),
                    "Expected a string",
                    "string",
                    value,
                ))
            }
        };

        let errors: Vec<SchemaError> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, s, path))
            .collect();

        match SchemaErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(s.to_string()),
        }
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for StringSchema {
    type Output = String;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<String, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate(value, path).map(Value::String)
    }
}

fn check_constraint(
    constraint: &StringConstraint,
    value: &str,
    path: &JsonPath,
) -> Option<SchemaError> {
    match constraint {
        StringConstraint::MinLength { min, message } => {
            let len = value.chars().count();
            (len < *min).then(|| {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("length must be at least {}, got {}", min, len));
                SchemaError::new(path.clone(), msg)
                    .with_code("min_length")
                    .with_expected(format!("at least {} characters", min))
                    .with_got(format!("{} characters", len))
            })
        }
        StringConstraint::MaxLength { max, message } => {
            let len = value.chars().count();
            (len > *max).then(|| {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("length must be at most {}, got {}", max, len));
                SchemaError::new(path.clone(), msg)
                    .with_code("max_length")
                    .with_expected(format!("at most {} characters", max))
                    .with_got(format!("{} characters", len))
            })
        }
        StringConstraint::Pattern { regex, message } => (!regex.is_match(value)).then(|| {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("must match pattern '{}'", regex.as_str()));
            SchemaError::new(path.clone(), msg)
                .with_code("pattern")
                .with_expected(format!("string matching '{}'", regex.as_str()))
                .with_got(value.to_string())
        }),
    }
}
