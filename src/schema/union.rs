//! Generic union: try each candidate in order.

use serde_json::Value;
use stillwater::prelude::*;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::{SchemaLike, ValueValidator};

/// How a union reports failure when no candidate matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnionOptions {
    /// Report every candidate's errors (true) or only the first candidate's (false).
    pub collect_all_errors: bool,
    /// Text prepended to each reported error message.
    pub error_prefix: Option<String>,
}

/// Accepts the first candidate that succeeds.
///
/// Candidates run in declaration order against the same value and path, so
/// earlier candidates win on ambiguous input. With no candidates the union
/// always fails.
///
/// # Example
///
/// ```rust
/// use pathwise::{validate, Schema, ValueValidator};
/// use serde_json::json;
///
/// let id = Schema::union(vec![
///     Box::new(Schema::string().min_len(1)) as Box<dyn ValueValidator>,
///     Box::new(Schema::number().int().positive()),
/// ])
/// .collect_all_errors(true);
///
/// assert!(validate(&id, &json!("abc")).is_success());
/// assert!(validate(&id, &json!(7)).is_success());
///
/// let errors = validate(&id, &json!(true)).into_result().unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
pub struct UnionSchema {
    candidates: Vec<Box<dyn ValueValidator>>,
    options: UnionOptions,
}

impl UnionSchema {
    /// Creates a union over `candidates` with default options (fail fast).
    pub fn new(candidates: Vec<Box<dyn ValueValidator>>) -> Self {
        Self {
            candidates,
            options: UnionOptions::default(),
        }
    }

    /// Appends a candidate.
    pub fn or<S: SchemaLike + 'static>(mut self, candidate: S) -> Self {
        self.candidates.push(Box::new(candidate));
        self
    }

    /// Replaces all options at once.
    pub fn options(mut self, options: UnionOptions) -> Self {
        self.options = options;
        self
    }

    /// Chooses between every candidate's errors and the first candidate's.
    pub fn collect_all_errors(mut self, collect: bool) -> Self {
        self.options.collect_all_errors = collect;
        self
    }

    /// Prepends `prefix` to every reported message.
    pub fn error_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.error_prefix = Some(prefix.into());
        self
    }

    fn report(&self, errors: SchemaErrors) -> SchemaErrors {
        match &self.options.error_prefix {
            Some(prefix) => errors.with_message_prefix(prefix),
            None => errors,
        }
    }
}

impl SchemaLike for UnionSchema {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        let mut collected: Option<SchemaErrors> = None;
        for (index, candidate) in self.candidates.iter().enumerate() {
            match candidate.validate_value(value, path) {
                Validation::Success(v) => return Validation::Success(v),
                Validation::Failure(errors) => {
                    tracing::trace!(
                        %path,
                        index,
                        errors = errors.len(),
                        "union candidate rejected value"
                    );
                    if !self.options.collect_all_errors {
                        return Validation::Failure(self.report(errors));
                    }
                    collected = Some(match collected {
                        Some(acc) => acc.combine(errors),
                        None => errors,
                    });
                }
            }
        }

        // Nothing collected means there were no candidates to try.
        match collected {
            Some(errors) => Validation::Failure(self.report(errors)),
            None => Validation::Failure(SchemaErrors::single(
                SchemaError::new(path.clone(), "No validators provided for union")
                    .with_code("union_empty"),
            )),
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        SchemaLike::validate(self, value, path)
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        for candidate in &self.candidates {
            candidate.collect_value_refs(refs);
        }
    }
}
