//! Common fields plus a variant.

use serde_json::Value;
use stillwater::Validation;

use crate::error::SchemaErrors;
use crate::path::JsonPath;

use super::traits::SchemaLike;

/// Validates shared fields first, then a variant, and merges both records.
///
/// A failure of the common part is returned immediately and the variant is
/// never consulted. On success both outputs are merged, with the variant's
/// keys overwriting common keys of the same name. When either output is not a
/// record, the variant's output is returned unmerged.
///
/// The common part usually declares `.strip()` so it ignores the keys that
/// only the variant knows about.
///
/// # Example
///
/// ```rust
/// use pathwise::{validate, Schema};
/// use serde_json::json;
///
/// let common = Schema::object()
///     .field("id", Schema::string().min_len(1))
///     .strip();
/// let variant = Schema::discriminated_union("type")
///     .variant("text", Schema::object()
///         .field("type", Schema::literal("text"))
///         .field("body", Schema::string())
///         .strip());
///
/// let block = Schema::composite(common, variant);
/// let result = validate(&block, &json!({"id": "b1", "type": "text", "body": "hi"}));
/// assert_eq!(
///     result.into_result().unwrap(),
///     json!({"id": "b1", "type": "text", "body": "hi"})
/// );
/// ```
pub struct CompositeSchema<C, V> {
    common: C,
    variant: V,
}

impl<C: SchemaLike, V: SchemaLike> CompositeSchema<C, V> {
    /// Combines `common` and `variant`.
    pub fn new(common: C, variant: V) -> Self {
        Self { common, variant }
    }
}

impl<C: SchemaLike, V: SchemaLike> SchemaLike for CompositeSchema<C, V> {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        let common = match self.common.validate_to_value(value, path) {
            Validation::Success(v) => v,
            failure @ Validation::Failure(_) => return failure,
        };
        let variant = match self.variant.validate_to_value(value, path) {
            Validation::Success(v) => v,
            failure @ Validation::Failure(_) => return failure,
        };

        match (common, variant) {
            (Value::Object(mut merged), Value::Object(specific)) => {
                merged.extend(specific);
                Validation::Success(Value::Object(merged))
            }
            (_, variant) => Validation::Success(variant),
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        SchemaLike::validate(self, value, path)
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        self.common.collect_refs(refs);
        self.variant.collect_refs(refs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NumberSchema, Schema, StringSchema};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn common() -> crate::schema::ObjectSchema {
        Schema::object()
            .field("id", StringSchema::new().min_len(1))
            .strip()
    }

    #[test]
    fn test_merges_records_variant_wins() {
        let variant = Schema::object()
            .field("id", Schema::transform(|_: &Value| json!("overridden")))
            .field("size", NumberSchema::new())
            .strip();
        let schema = CompositeSchema::new(common(), variant);

        let result = schema.validate_to_value(&json!({"id": "a", "size": 3}), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), json!({"id": "overridden", "size": 3}));
    }

    #[test]
    fn test_common_failure_skips_variant() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let variant = Schema::custom(move |v: &Value, _: &JsonPath| {
            counter.fetch_add(1, Ordering::SeqCst);
            Validation::Success(v.clone())
        });
        let schema = CompositeSchema::new(common(), variant);

        let errors = schema
            .validate_to_value(&json!({"id": ""}), &JsonPath::root())
            .into_result()
            .unwrap_err();
        assert_eq!(errors.paths(), vec!["id"]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_variant_failure_is_returned() {
        let variant = Schema::object()
            .field("size", NumberSchema::new().positive())
            .strip();
        let path = JsonPath::root().push_field("blocks").push_index(0);
        let errors = CompositeSchema::new(common(), variant)
            .validate_to_value(&json!({"id": "a", "size": -1}), &path)
            .into_result()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().path.to_string(), "blocks[0].size");
    }

    #[test]
    fn test_non_record_output_returns_variant() {
        let schema = CompositeSchema::new(
            Schema::transform(|_: &Value| json!(1)),
            Schema::transform(|_: &Value| json!("variant")),
        );
        let result = schema.validate_to_value(&json!({}), &JsonPath::root());
        assert_eq!(result.into_result().unwrap(), json!("variant"));
    }
}
