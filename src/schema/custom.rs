//! Closure-backed validators.
//!
//! These lift plain functions into the validator contract so callers can
//! write their own leaves and steps for [`PipeSchema`](super::PipeSchema).

use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::SchemaLike;

/// A validator defined by a closure over `(value, path)`.
///
/// The closure is responsible for honouring the contract: errors must carry
/// the path it was given.
///
/// ```rust
/// use pathwise::{validate, JsonPath, Schema, SchemaError, SchemaErrors};
/// use serde_json::{json, Value};
/// use stillwater::Validation;
///
/// let even = Schema::custom(|value: &Value, path: &JsonPath| match value.as_i64() {
///     Some(n) if n % 2 == 0 => Validation::Success(value.clone()),
///     _ => Validation::Failure(SchemaErrors::single(SchemaError::new(
///         path.clone(),
///         "must be even",
///     ))),
/// });
///
/// assert!(validate(&even, &json!(4)).is_success());
/// assert!(validate(&even, &json!(3)).is_failure());
/// ```
pub struct CustomSchema<F> {
    validate_fn: F,
}

impl<F> CustomSchema<F>
where
    F: Fn(&Value, &JsonPath) -> Validation<Value, SchemaErrors> + Send + Sync,
{
    /// Wraps `validate_fn`.
    pub fn new(validate_fn: F) -> Self {
        Self { validate_fn }
    }
}

impl<F> SchemaLike for CustomSchema<F>
where
    F: Fn(&Value, &JsonPath) -> Validation<Value, SchemaErrors> + Send + Sync,
{
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        (self.validate_fn)(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        (self.validate_fn)(value, path)
    }
}

/// An infallible value transformation.
pub struct TransformSchema<F> {
    transform_fn: F,
}

impl<F> TransformSchema<F>
where
    F: Fn(&Value) -> Value + Send + Sync,
{
    /// Wraps `transform_fn`.
    pub fn new(transform_fn: F) -> Self {
        Self { transform_fn }
    }
}

impl<F> SchemaLike for TransformSchema<F>
where
    F: Fn(&Value) -> Value + Send + Sync,
{
    type Output = Value;

    fn validate(&self, value: &Value, _path: &JsonPath) -> Validation<Value, SchemaErrors> {
        Validation::Success((self.transform_fn)(value))
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        SchemaLike::validate(self, value, path)
    }
}

/// A predicate check that passes the value through unchanged.
pub struct RefineSchema<F> {
    predicate: F,
    message: String,
}

impl<F> RefineSchema<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    /// Fails with `message` whenever `predicate` returns false.
    pub fn new(predicate: F, message: impl Into<String>) -> Self {
        Self {
            predicate,
            message: message.into(),
        }
    }
}

impl<F> SchemaLike for RefineSchema<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        if (self.predicate)(value) {
            Validation::Success(value.clone())
        } else {
            Validation::Failure(SchemaErrors::single(SchemaError::new(
                path.clone(),
                self.message.clone(),
            )))
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        SchemaLike::validate(self, value, path)
    }
}
