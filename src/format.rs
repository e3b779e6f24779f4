//! Flattening errors into a path-keyed map for display.

use indexmap::IndexMap;

use crate::error::SchemaErrors;

/// Renders `errors` as a map from path string to message.
///
/// Paths render as in [`JsonPath`](crate::JsonPath)'s `Display`: fields are
/// dot-joined and indices (or all-digit field names) are bracketed, so
/// `["users", "0", "email"]` becomes `users[0].email`. The root path renders
/// as the empty string.
///
/// Keys keep the order of their first occurrence. When several errors render
/// to the same path, the last message wins.
///
/// # Example
///
/// ```rust
/// use pathwise::{format_errors, validate, Schema};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("users", Schema::array(Schema::object().field("email", Schema::string())));
///
/// let errors = validate(&schema, &json!({"users": [{"email": 1}]})).into_result().unwrap_err();
/// let formatted = format_errors(&errors);
/// assert_eq!(formatted["users[0].email"], "Expected a string");
/// ```
pub fn format_errors(errors: &SchemaErrors) -> IndexMap<String, String> {
    let mut formatted = IndexMap::with_capacity(errors.len());
    for error in errors {
        formatted.insert(error.path.to_string(), error.message.clone());
    }
    formatted
}
