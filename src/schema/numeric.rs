//! Numeric leaf validation.

use serde_json::{Number, Value};
use std::ops::RangeInclusive;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::SchemaLike;
use super::type_error;

#[derive(Clone)]
enum NumberConstraint {
    Min { value: f64, message: Option<String> },
    Max { value: f64, message: Option<String> },
    Positive { message: Option<String> },
    NonNegative { message: Option<String> },
    Integer { message: Option<String> },
}

/// A leaf validating numbers.
///
/// The typed output is an `f64`; the type-erased output is the input number
/// unchanged, so integers stay integers when re-serialized.
///
/// # Example
///
/// ```rust
/// use pathwise::{validate, Schema};
/// use serde_json::json;
///
/// let schema = Schema::number().range(0.0..=100.0);
///
/// assert!(validate(&schema, &json!(50)).is_success());
/// assert!(validate(&schema, &json!(-5)).is_failure());
/// ```
#[derive(Clone)]
pub struct NumberSchema {
    constraints: Vec<NumberConstraint>,
    type_error_message: Option<String>,
}

impl NumberSchema {
    /// Creates a new number schema with no constraints.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// Adds an inclusive lower bound.
    pub fn min(mut self, value: f64) -> Self {
        self.constraints.push(NumberConstraint::Min {
            value,
            message: None,
        });
        self
    }

    /// Adds an inclusive upper bound.
    pub fn max(mut self, value: f64) -> Self {
        self.constraints.push(NumberConstraint::Max {
            value,
            message: None,
        });
        self
    }

    /// Equivalent to `.min(start).max(end)`.
    pub fn range(self, range: RangeInclusive<f64>) -> Self {
        let (start, end) = range.into_inner();
        self.min(start).max(end)
    }

    /// Requires the value to be greater than zero.
    pub fn positive(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::Positive { message: None });
        self
    }

    /// Requires the value to be zero or greater.
    pub fn non_negative(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::NonNegative { message: None });
        self
    }

    /// Requires the value to have no fractional part.
    pub fn int(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::Integer { message: None });
        self
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// With no constraints yet, sets the message used when the value is not
    /// a number.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.constraints.last_mut() {
            Some(NumberConstraint::Min { message: m, .. })
            | Some(NumberConstraint::Max { message: m, .. })
            | Some(NumberConstraint::Positive { message: m })
            | Some(NumberConstraint::NonNegative { message: m })
            | Some(NumberConstraint::Integer { message: m }) => *m = Some(message.into()),
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: &Value, path: &JsonPath) -> Validation<f64, SchemaErrors> {
        let n = match value.as_f64() {
            Some(n) => n,
            None => {
                return Validation::Failure(type_error(
                    path,
                    self.type_error_message.as_deref(),
                    "Expected a number",
                    "number",
                    value,
                ))
            }
        };
        check_number(&self.constraints, n, path)
    }
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for NumberSchema {
    type Output = f64;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<f64, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate(value, path).map(|_| value.clone())
    }
}

/// A leaf turning numeric strings (`"42"`, `"-1.5"`) into numbers.
///
/// Number constraints run against the parsed value. Actual JSON numbers are
/// rejected; this leaf transforms text, it does not accept both shapes.
#[derive(Clone, Default)]
pub struct NumericStringSchema {
    constraints: Vec<NumberConstraint>,
}

impl NumericStringSchema {
    /// Creates a new numeric-string schema with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an inclusive lower bound on the parsed value.
    pub fn min(mut self, value: f64) -> Self {
        self.constraints.push(NumberConstraint::Min {
            value,
            message: None,
        });
        self
    }

    /// Adds an inclusive upper bound on the parsed value.
    pub fn max(mut self, value: f64) -> Self {
        self.constraints.push(NumberConstraint::Max {
            value,
            message: None,
        });
        self
    }

    /// Requires the parsed value to have no fractional part.
    pub fn int(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::Integer { message: None });
        self
    }
}

impl SchemaLike for NumericStringSchema {
    type Output = f64;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<f64, SchemaErrors> {
        let s = match value.as_str() {
            Some(s) => s,
            None => {
                return Validation::Failure(type_error(
                    path,
                    None,
                    "Expected a numeric string",
                    "string",
                    value,
                ))
            }
        };
        match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() && !s.trim().is_empty() => {
                check_number(&self.constraints, n, path)
            }
            _ => Validation::Failure(SchemaErrors::single(
                SchemaError::new(path.clone(), "Expected a numeric string")
                    .with_code("invalid_type")
                    .with_expected("numeric string")
                    .with_got(s),
            )),
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        SchemaLike::validate(self, value, path).map(number_value)
    }
}

/// Converts an `f64` into a JSON number, preferring an integer representation.
pub(crate) fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

fn check_number(
    constraints: &[NumberConstraint],
    n: f64,
    path: &JsonPath,
) -> Validation<f64, SchemaErrors> {
    let errors: Vec<SchemaError> = constraints
        .iter()
        .filter_map(|c| check_constraint(c, n, path))
        .collect();

    match SchemaErrors::from_vec(errors) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(n),
    }
}

fn check_constraint(constraint: &NumberConstraint, n: f64, path: &JsonPath) -> Option<SchemaError> {
    let fail = |message: &Option<String>, default: String, code: &str, expected: String| {
        SchemaError::new(path.clone(), message.clone().unwrap_or(default))
            .with_code(code)
            .with_expected(expected)
            .with_got(n.to_string())
    };

    match constraint {
        NumberConstraint::Min { value, message } => (n < *value).then(|| {
            fail(
                message,
                format!("value must be >= {}, got {}", value, n),
                "min_value",
                format!(">= {}", value),
            )
        }),
        NumberConstraint::Max { value, message } => (n > *value).then(|| {
            fail(
                message,
                format!("value must be <= {}, got {}", value, n),
                "max_value",
                format!("<= {}", value),
            )
        }),
        NumberConstraint::Positive { message } => (n <= 0.0).then(|| {
            fail(
                message,
                format!("value must be positive, got {}", n),
                "positive",
                "> 0".to_string(),
            )
        }),
        NumberConstraint::NonNegative { message } => (n < 0.0).then(|| {
            fail(
                message,
                format!("value must be non-negative, got {}", n),
                "non_negative",
                ">= 0".to_string(),
            )
        }),
        NumberConstraint::Integer { message } => (n.fract() != 0.0).then(|| {
            fail(
                message,
                format!("value must be an integer, got {}", n),
                "integer",
                "integer".to_string(),
            )
        }),
    }
}
