//! Discriminated union: select one variant by a tag field.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::{SchemaLike, ValueValidator};
use super::type_error;

const DEFAULT_FALLBACK_MESSAGE: &str = "Invalid discriminant value";

/// Dispatches on a string tag field to exactly one variant validator.
///
/// The tag is read from the record, the variant is looked up by the tag's
/// value, and the whole record (tag included) is validated by that variant at
/// the unchanged path. Failure always has a single cause: a non-record input,
/// a missing or non-string tag, an unregistered tag value, or the selected
/// variant's own errors.
///
/// # Example
///
/// ```rust
/// use pathwise::{validate, Schema};
/// use serde_json::json;
///
/// let block = Schema::discriminated_union("type")
///     .variant("text", Schema::object()
///         .field("type", Schema::literal("text"))
///         .field("body", Schema::string()))
///     .variant("image", Schema::object()
///         .field("type", Schema::literal("image"))
///         .field("url", Schema::string()));
///
/// assert!(validate(&block, &json!({"type": "image", "url": "http://x"})).is_success());
///
/// let errors = validate(&block, &json!({"type": "video"})).into_result().unwrap_err();
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.first().path.to_string(), "type");
/// assert!(errors.first().message.contains("\"video\""));
/// ```
pub struct DiscriminatedUnionSchema {
    discriminant: String,
    variants: IndexMap<String, Arc<dyn ValueValidator>>,
    fallback_message: String,
}

impl DiscriminatedUnionSchema {
    /// Creates a union keyed on the `discriminant` field, with no variants.
    pub fn new(discriminant: impl Into<String>) -> Self {
        Self {
            discriminant: discriminant.into(),
            variants: IndexMap::new(),
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
        }
    }

    /// Registers `schema` for records whose tag equals `tag`.
    ///
    /// Registering a tag twice replaces the earlier variant.
    pub fn variant<S>(mut self, tag: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.variants.insert(tag.into(), Arc::new(schema));
        self
    }

    /// Sets the message reported for an unregistered tag value.
    ///
    /// The offending value is appended to it.
    pub fn fallback_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = message.into();
        self
    }

    /// Returns the name of the tag field.
    pub fn discriminant(&self) -> &str {
        &self.discriminant
    }

    /// Returns the registered tag values in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }
}

impl SchemaLike for DiscriminatedUnionSchema {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => {
                return Validation::Failure(type_error(
                    path,
                    None,
                    "Expected an object",
                    "object",
                    value,
                ))
            }
        };

        let tag_path = path.push_field(&self.discriminant);
        let tag = match obj.get(&self.discriminant).and_then(Value::as_str) {
            Some(tag) => tag,
            None => {
                let got = obj
                    .get(&self.discriminant)
                    .map(Value::to_string)
                    .unwrap_or_else(|| "nothing".to_string());
                return Validation::Failure(SchemaErrors::single(
                    SchemaError::new(
                        tag_path,
                        format!("Missing or invalid discriminant '{}'", self.discriminant),
                    )
                    .with_code("invalid_discriminant")
                    .with_expected("string")
                    .with_got(got),
                ));
            }
        };

        match self.variants.get(tag) {
            Some(variant) => {
                tracing::trace!(%path, tag, "dispatching discriminated union");
                variant.validate_value(value, path)
            }
            None => {
                let offending = Value::String(tag.to_string());
                let known: Vec<_> = self.tags().collect();
                Validation::Failure(SchemaErrors::single(
                    SchemaError::new(
                        tag_path,
                        format!("{}: {}", self.fallback_message, offending),
                    )
                    .with_code("unknown_variant")
                    .with_expected(format!("one of: {}", known.join(", ")))
                    .with_got(offending.to_string()),
                ))
            }
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        SchemaLike::validate(self, value, path)
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        for variant in self.variants.values() {
            variant.collect_value_refs(refs);
        }
    }
}
