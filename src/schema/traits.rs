//! The validator contract.
//!
//! Every leaf and every combinator implements [`SchemaLike`]. Aggregators never
//! distinguish between an atomic check and a composed schema; they only see
//! this trait (or its type-erased form, [`ValueValidator`]).

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::SchemaErrors;
use crate::path::JsonPath;

/// A validator from untyped input to a typed value or located errors.
///
/// Implementations must be pure: the same `(value, path)` always produces the
/// same outcome, the input is never mutated, and every error a leaf emits
/// carries exactly the `path` it was handed. Only the object and array
/// aggregators (and the discriminant lookup) extend the path.
///
/// The `Send + Sync` bounds let one schema be shared across threads.
///
/// # Example
///
/// ```rust
/// use pathwise::{JsonPath, Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::string().min_len(1);
/// let at = JsonPath::root().push_field("name");
///
/// let result = schema.validate(&json!(""), &at);
/// let errors = result.into_result().unwrap_err();
/// assert_eq!(errors.first().path, at);
/// ```
pub trait SchemaLike: Send + Sync {
    /// The output type produced by successful validation.
    type Output;

    /// Validates a value located at `path`.
    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, SchemaErrors>;

    /// Validates a value and returns the output as a `serde_json::Value`.
    ///
    /// Aggregators store heterogeneous field outputs through this method.
    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors>;

    /// Collects the names of registry references reachable from this schema.
    fn collect_refs(&self, _refs: &mut Vec<String>) {}
}

/// Type-erased form of [`SchemaLike`].
///
/// Implemented for every `SchemaLike`, so any schema can be boxed or shared
/// behind `Box<dyn ValueValidator>` / `Arc<dyn ValueValidator>`.
///
/// ```rust
/// use pathwise::{Schema, ValueValidator};
///
/// let candidates: Vec<Box<dyn ValueValidator>> = vec![
///     Box::new(Schema::string().min_len(1)),
///     Box::new(Schema::number().positive()),
/// ];
/// assert_eq!(candidates.len(), 2);
/// ```
pub trait ValueValidator: Send + Sync {
    /// Validates a value and returns the output as a `serde_json::Value`.
    fn validate_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors>;

    /// Collects the names of registry references reachable from this schema.
    fn collect_value_refs(&self, refs: &mut Vec<String>);
}

impl<S: SchemaLike> ValueValidator for S {
    fn validate_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate_to_value(value, path)
    }

    fn collect_value_refs(&self, refs: &mut Vec<String>) {
        self.collect_refs(refs)
    }
}

/// A shared schema can be reused as a field or candidate of several parents.
impl SchemaLike for Arc<dyn ValueValidator> {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        (**self).validate_value(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        (**self).validate_value(value, path)
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        (**self).collect_value_refs(refs)
    }
}

impl SchemaLike for Box<dyn ValueValidator> {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        (**self).validate_value(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        (**self).validate_value(value, path)
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        (**self).collect_value_refs(refs)
    }
}
