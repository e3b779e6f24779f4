//! # Pathwise
//!
//! Composable validation for untyped JSON input that reports every failure,
//! each located by the path to the offending value.
//!
//! ## Overview
//!
//! A validator takes a `serde_json::Value` and the path at which that value
//! sits, and produces either a typed output or a non-empty list of errors.
//! Records and sequences are checked exhaustively: a record with three bad
//! fields yields three errors, one per field path. Alternatives (unions,
//! discriminated unions) and sequences of steps (pipes) short-circuit instead.
//! Outcomes are stillwater's `Validation`, so failures are values rather than
//! panics or early returns.
//!
//! ## Core Types
//!
//! - [`JsonPath`]: the location of a value (e.g., `users[0].email`)
//! - [`SchemaError`]: one failure with its path, message and code
//! - [`SchemaErrors`]: a non-empty list of failures
//! - [`Schema`]: entry point for building validators
//! - [`SchemaRegistry`]: named schemas and recursive references
//! - [`format_errors`]: flattens errors into a path-to-message map
//!
//! ## Example
//!
//! ```rust
//! use pathwise::{format_errors, validate, Schema};
//! use serde_json::json;
//!
//! let user = Schema::object()
//!     .required("name", Schema::string().min_len(1))
//!     .field("age", Schema::integer().range(0.0..=150.0))
//!     .field("tags", Schema::array(Schema::string()));
//!
//! let input = json!({"name": "", "age": 200, "tags": ["a", 2]});
//! let errors = validate(&user, &input).into_result().unwrap_err();
//!
//! let formatted = format_errors(&errors);
//! assert_eq!(formatted.len(), 3);
//! assert!(formatted.contains_key("tags[1]"));
//! ```

pub mod error;
pub mod format;
pub mod path;
pub mod registry;
pub mod schema;

pub use error::{SchemaError, SchemaErrors};
pub use format::format_errors;
pub use path::{JsonPath, PathSegment};
pub use registry::{RegistryError, SchemaRegistry};
pub use schema::{
    ArraySchema, BooleanSchema, BooleanStringSchema, CompositeSchema, CustomSchema, DateSchema,
    DefaultSchema, DiscriminatedUnionSchema, EnumSchema, LiteralSchema, NumberSchema,
    NumericStringSchema, ObjectSchema, OptionalSchema, PipeSchema, RefSchema, RefineSchema,
    RequiredSchema, Schema, SchemaLike, StringSchema, TransformSchema, UnionOptions, UnionSchema,
    UnknownKeys, ValueValidator,
};

/// Type alias for validation results using SchemaErrors
pub type ValidationResult<T> = stillwater::Validation<T, SchemaErrors>;

/// Validates `value` against `schema` at the root path.
///
/// This is the entry point for top-level validation; nested validators are
/// always handed an explicit path by their parent.
pub fn validate<S: SchemaLike + ?Sized>(
    schema: &S,
    value: &serde_json::Value,
) -> ValidationResult<S::Output> {
    schema.validate(value, &JsonPath::root())
}
