//! Validators and combinators.
//!
//! Leaves check a single value (strings, numbers, booleans, literals, dates).
//! Aggregators ([`ObjectSchema`], [`ArraySchema`]) walk into records and
//! sequences, extend the path, and report every failure they find. The
//! remaining combinators compose validators: in sequence ([`PipeSchema`]), as
//! alternatives ([`UnionSchema`], [`DiscriminatedUnionSchema`]), or around
//! presence ([`RequiredSchema`], [`OptionalSchema`], [`DefaultSchema`]).
//!
//! # Example
//!
//! ```rust
//! use pathwise::{validate, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::object()
//!     .field("tags", Schema::array(Schema::string().min_len(1)).max_len(3));
//!
//! let errors = validate(&schema, &json!({"tags": ["ok", "", "fine", ""]}))
//!     .into_result()
//!     .unwrap_err();
//! assert_eq!(errors.paths(), vec!["tags", "tags[1]", "tags[3]"]);
//! ```

mod array;
mod boolean;
mod composite;
mod custom;
mod date;
mod discriminated;
mod literal;
mod numeric;
mod object;
mod pipe;
mod presence;
mod ref_schema;
mod string;
mod traits;
mod union;

pub use array::ArraySchema;
pub use boolean::{BooleanSchema, BooleanStringSchema};
pub use composite::CompositeSchema;
pub use custom::{CustomSchema, RefineSchema, TransformSchema};
pub use date::DateSchema;
pub use discriminated::DiscriminatedUnionSchema;
pub use literal::{EnumSchema, LiteralSchema};
pub use numeric::{NumberSchema, NumericStringSchema};
pub use object::{ObjectSchema, UnknownKeys};
pub use pipe::PipeSchema;
pub use presence::{DefaultSchema, OptionalSchema, RequiredSchema};
pub use ref_schema::RefSchema;
pub use string::StringSchema;
pub use traits::{SchemaLike, ValueValidator};
pub use union::{UnionOptions, UnionSchema};

pub(crate) use ref_schema::SchemaMap;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::JsonPath;

/// Builds the single `invalid_type` error every validator reports when the
/// input has the wrong JSON kind.
pub(crate) fn type_error(
    path: &JsonPath,
    custom: Option<&str>,
    default: &str,
    expected: &str,
    value: &Value,
) -> SchemaErrors {
    SchemaErrors::single(
        SchemaError::new(path.clone(), custom.unwrap_or(default))
            .with_code("invalid_type")
            .with_expected(expected)
            .with_got(value_type_name(value)),
    )
}

pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Entry point for building schemas.
///
/// Every constructor returns a builder that is configured by chaining and is
/// then immutable; the same schema can validate any number of values, from
/// any number of threads.
///
/// # Example
///
/// ```rust
/// use pathwise::{validate, Schema};
/// use serde_json::json;
///
/// let email = Schema::string()
///     .min_len(3)
///     .pattern(r"^[^@]+@[^@]+$")
///     .unwrap()
///     .error("must be an email address");
///
/// assert!(validate(&email, &json!("a@b.c")).is_success());
/// assert_eq!(
///     validate(&email, &json!("nope")).into_result().unwrap_err().first().message,
///     "must be an email address"
/// );
/// ```
pub struct Schema;

impl Schema {
    /// Creates a string schema.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates a number schema accepting any finite JSON number.
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    /// Creates a number schema that only accepts whole numbers.
    ///
    /// ```rust
    /// use pathwise::{validate, Schema};
    /// use serde_json::json;
    ///
    /// let count = Schema::integer().non_negative();
    /// assert!(validate(&count, &json!(3)).is_success());
    /// assert!(validate(&count, &json!(1.5)).is_failure());
    /// ```
    pub fn integer() -> NumberSchema {
        NumberSchema::new().int()
    }

    /// Creates a boolean schema.
    pub fn boolean() -> BooleanSchema {
        BooleanSchema::new()
    }

    /// Creates a schema parsing `"true"` / `"false"` text into a boolean.
    pub fn boolean_string() -> BooleanStringSchema {
        BooleanStringSchema::new()
    }

    /// Creates a schema parsing numeric text into a number.
    pub fn numeric_string() -> NumericStringSchema {
        NumericStringSchema::new()
    }

    /// Creates a schema for `YYYY-MM-DD` calendar dates.
    pub fn date() -> DateSchema {
        DateSchema::new()
    }

    /// Creates a schema accepting exactly `value`.
    pub fn literal(value: impl Into<Value>) -> LiteralSchema {
        LiteralSchema::new(value)
    }

    /// Creates a schema accepting any one of `allowed` strings.
    pub fn enumeration<I, S>(allowed: I) -> EnumSchema
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EnumSchema::new(allowed)
    }

    /// Creates a strict record schema with no fields.
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Creates a sequence schema validating each item with `item`.
    pub fn array<S: SchemaLike>(item: S) -> ArraySchema<S> {
        ArraySchema::new(item)
    }

    /// Starts a pipe whose first step is `first`.
    pub fn pipe<S: SchemaLike + 'static>(first: S) -> PipeSchema {
        PipeSchema::new(first)
    }

    /// Rejects absent or null values with "Field is required".
    pub fn required<S: SchemaLike>(inner: S) -> RequiredSchema<S> {
        RequiredSchema::new(inner)
    }

    /// Accepts absent or null values without running `inner`.
    pub fn optional<S: SchemaLike>(inner: S) -> OptionalSchema<S> {
        OptionalSchema::new(inner)
    }

    /// Substitutes `default` for absent or null values.
    pub fn default<S: SchemaLike>(inner: S, default: Value) -> DefaultSchema<S> {
        DefaultSchema::new(inner, default)
    }

    /// Creates a union trying `candidates` in order.
    pub fn union(candidates: Vec<Box<dyn ValueValidator>>) -> UnionSchema {
        UnionSchema::new(candidates)
    }

    /// Creates a discriminated union keyed on `discriminant`.
    pub fn discriminated_union(discriminant: impl Into<String>) -> DiscriminatedUnionSchema {
        DiscriminatedUnionSchema::new(discriminant)
    }

    /// Validates `common` then `variant` and merges their records.
    pub fn composite<C: SchemaLike, V: SchemaLike>(common: C, variant: V) -> CompositeSchema<C, V> {
        CompositeSchema::new(common, variant)
    }

    /// Lifts a closure into a validator.
    pub fn custom<F>(validate_fn: F) -> CustomSchema<F>
    where
        F: Fn(&Value, &JsonPath) -> Validation<Value, SchemaErrors> + Send + Sync,
    {
        CustomSchema::new(validate_fn)
    }

    /// Lifts an infallible transformation into a validator.
    pub fn transform<F>(transform_fn: F) -> TransformSchema<F>
    where
        F: Fn(&Value) -> Value + Send + Sync,
    {
        TransformSchema::new(transform_fn)
    }

    /// Lifts a predicate into a validator failing with `message`.
    pub fn refine<F>(predicate: F, message: impl Into<String>) -> RefineSchema<F>
    where
        F: Fn(&Value) -> bool + Send + Sync,
    {
        RefineSchema::new(predicate, message)
    }
}
