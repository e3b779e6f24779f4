//! Sequential composition.

use serde_json::Value;
use stillwater::Validation;

use crate::error::SchemaErrors;
use crate::path::JsonPath;

use super::traits::{SchemaLike, ValueValidator};

/// Runs validators left to right, feeding each one's output to the next.
///
/// The first failure is returned unchanged and no later step runs. Every step
/// sees the same path; only aggregators extend it. A pipe always has at least
/// one step.
///
/// # Example
///
/// ```rust
/// use pathwise::{validate, Schema};
/// use serde_json::json;
///
/// // non-empty text -> number -> range check
/// let age = Schema::pipe(Schema::string().min_len(1))
///     .then(Schema::numeric_string())
///     .then(Schema::number().range(0.0..=150.0));
///
/// assert_eq!(validate(&age, &json!("42")).into_result().unwrap(), json!(42));
///
/// let errors = validate(&age, &json!("")).into_result().unwrap_err();
/// assert_eq!(errors.first().code, "min_length");
/// ```
pub struct PipeSchema {
    steps: Vec<Box<dyn ValueValidator>>,
}

impl PipeSchema {
    /// Starts a pipe with its first step.
    pub fn new<S: SchemaLike + 'static>(first: S) -> Self {
        Self {
            steps: vec![Box::new(first)],
        }
    }

    /// Appends a step that receives the previous step's output.
    pub fn then<S: SchemaLike + 'static>(mut self, next: S) -> Self {
        self.steps.push(Box::new(next));
        self
    }

    /// Returns the number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false: a pipe is built from at least one step.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl SchemaLike for PipeSchema {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        let mut current = value.clone();
        for step in &self.steps {
            match step.validate_value(&current, path) {
                Validation::Success(next) => current = next,
                failure @ Validation::Failure(_) => return failure,
            }
        }
        Validation::Success(current)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        SchemaLike::validate(self, value, path)
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        for step in &self.steps {
            step.collect_value_refs(refs);
        }
    }
}
