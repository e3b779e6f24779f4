//! Presence adapters: required, optional and defaulted values.
//!
//! `null` and an absent record key are the same thing here (the object
//! aggregator hands absent keys to its fields as `null`). None of these
//! adapters add a path segment.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::SchemaLike;

const DEFAULT_REQUIRED_MESSAGE: &str = "Field is required";

/// Rejects absent input before delegating.
///
/// ```rust
/// use pathwise::{validate, Schema};
/// use serde_json::json;
///
/// let name = Schema::required(Schema::string());
/// let errors = validate(&name, &json!(null)).into_result().unwrap_err();
/// assert_eq!(errors.first().message, "Field is required");
/// ```
pub struct RequiredSchema<S> {
    inner: S,
    message: String,
}

impl<S: SchemaLike> RequiredSchema<S> {
    /// Wraps `inner` with the default "Field is required" message.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            message: DEFAULT_REQUIRED_MESSAGE.to_string(),
        }
    }

    /// Replaces the message reported for absent input.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    fn missing(&self, path: &JsonPath) -> SchemaErrors {
        SchemaErrors::single(
            SchemaError::new(path.clone(), self.message.clone())
                .with_code("required")
                .with_expected("value"),
        )
    }
}

impl<S: SchemaLike> SchemaLike for RequiredSchema<S> {
    type Output = S::Output;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<S::Output, SchemaErrors> {
        if value.is_null() {
            return Validation::Failure(self.missing(path));
        }
        self.inner.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        if value.is_null() {
            return Validation::Failure(self.missing(path));
        }
        self.inner.validate_to_value(value, path)
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        self.inner.collect_refs(refs)
    }
}

/// Accepts absent input as `None` without running the inner validator.
///
/// The type-erased absent marker is `Value::Null`.
pub struct OptionalSchema<S> {
    inner: S,
}

impl<S: SchemaLike> OptionalSchema<S> {
    /// Wraps `inner`.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: SchemaLike> SchemaLike for OptionalSchema<S> {
    type Output = Option<S::Output>;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, SchemaErrors> {
        if value.is_null() {
            return Validation::Success(None);
        }
        self.inner.validate(value, path).map(Some)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        if value.is_null() {
            return Validation::Success(Value::Null);
        }
        self.inner.validate_to_value(value, path)
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        self.inner.collect_refs(refs)
    }
}

/// Substitutes a fixed value for absent input.
pub struct DefaultSchema<S> {
    inner: S,
    default: Value,
}

impl<S: SchemaLike> DefaultSchema<S> {
    /// Wraps `inner`, yielding `default` for absent input.
    pub fn new(inner: S, default: Value) -> Self {
        Self { inner, default }
    }
}

impl<S: SchemaLike> SchemaLike for DefaultSchema<S> {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        if value.is_null() {
            return Validation::Success(self.default.clone());
        }
        self.inner.validate_to_value(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        SchemaLike::validate(self, value, path)
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        self.inner.collect_refs(refs)
    }
}
