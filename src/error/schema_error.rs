//! Validation error types.
//!
//! [`SchemaError`] is one located failure; [`SchemaErrors`] is the non-empty
//! list carried by every failed outcome.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::JsonPath;

/// A single validation failure and where it happened.
///
/// Structural mismatches, constraint violations and dispatch failures all use
/// this one shape. The `code` field tells them apart for programmatic use.
///
/// # Example
///
/// ```rust
/// use pathwise::{JsonPath, SchemaError};
///
/// let error = SchemaError::new(JsonPath::root().push_field("email"), "invalid email format")
///     .with_code("pattern")
///     .with_got("not-an-email");
///
/// assert_eq!(error.to_string(), "email: invalid email format (got: not-an-email)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// The path to the value that failed validation.
    pub path: JsonPath,
    /// Human-readable error message.
    pub message: String,
    /// The actual value that was received, rendered as text.
    pub got: Option<String>,
    /// Description of what was expected.
    pub expected: Option<String>,
    /// Machine-readable error code (e.g., `unrecognized_key`).
    pub code: String,
}

impl SchemaError {
    /// Creates a new error with the code `custom`.
    pub fn new(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            got: None,
            expected: None,
            code: "custom".to_string(),
        }
    }

    /// Sets the error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the "got" (actual value) field.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    /// Sets the "expected" field.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)?;
        } else {
            write!(f, "{}: {}", self.path, self.message)?;
        }

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }

        Ok(())
    }
}

impl std::error::Error for SchemaError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaError>();
    assert_sync::<SchemaError>();
};

/// A non-empty, ordered list of validation errors.
///
/// Order follows evaluation order: fields in schema order, elements in index
/// order, union candidates in declaration order.
///
/// ```rust
/// use pathwise::{JsonPath, SchemaError, SchemaErrors};
/// use stillwater::prelude::*;
///
/// let name = SchemaErrors::single(SchemaError::new(JsonPath::from_iter(["name"]), "required"));
/// let email = SchemaErrors::single(SchemaError::new(JsonPath::from_iter(["email"]), "invalid"));
///
/// let combined = name.combine(email);
/// assert_eq!(combined.len(), 2);
/// assert_eq!(combined.first().message, "required");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrors(NonEmptyVec<SchemaError>);

impl SchemaErrors {
    /// Creates a collection holding one error.
    pub fn single(error: SchemaError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a collection from a `NonEmptyVec` of errors.
    pub fn from_non_empty(errors: NonEmptyVec<SchemaError>) -> Self {
        Self(errors)
    }

    /// Creates a collection from a `Vec`, or `None` when it is empty.
    ///
    /// Aggregators gather errors into a plain `Vec` and use this to decide
    /// between success and failure.
    pub fn from_vec(errors: Vec<SchemaError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaError> {
        self.0.iter()
    }

    /// Returns all errors at the specified path.
    pub fn at_path(&self, path: &JsonPath) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Returns all errors with the specified error code.
    pub fn with_code(&self, code: &str) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &SchemaError {
        self.0.head()
    }

    /// Returns every error's path rendered as a string, in order.
    pub fn paths(&self) -> Vec<String> {
        self.0.iter().map(|e| e.path.to_string()).collect()
    }

    /// Returns a copy with `prefix` prepended to every message.
    pub fn with_message_prefix(&self, prefix: &str) -> Self {
        let prefixed = |error: &SchemaError| {
            let mut error = error.clone();
            error.message = format!("{}{}", prefix, error.message);
            error
        };
        self.iter()
            .skip(1)
            .fold(Self::single(prefixed(self.first())), |acc, e| {
                acc.combine(Self::single(prefixed(e)))
            })
    }

    /// Converts this collection into a `Vec<SchemaError>`.
    pub fn into_vec(self) -> Vec<SchemaError> {
        self.0.into_vec()
    }

    /// Returns a reference to the underlying `NonEmptyVec`.
    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<SchemaError> {
        &self.0
    }
}

impl Semigroup for SchemaErrors {
    fn combine(self, other: Self) -> Self {
        SchemaErrors(self.0.combine(other.0))
    }
}

impl Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl From<SchemaError> for SchemaErrors {
    fn from(error: SchemaError) -> Self {
        Self::single(error)
    }
}

impl IntoIterator for SchemaErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a SchemaErrors {
    type Item = &'a SchemaError;
    type IntoIter = Box<dyn Iterator<Item = &'a SchemaError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaErrors>();
    assert_sync::<SchemaErrors>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_defaults() {
        let error = SchemaError::new(JsonPath::root().push_field("name"), "field is required");

        assert_eq!(error.path, JsonPath::root().push_field("name"));
        assert_eq!(error.message, "field is required");
        assert_eq!(error.code, "custom");
        assert!(error.got.is_none());
        assert!(error.expected.is_none());
    }

    #[test]
    fn test_schema_error_display() {
        let error = SchemaError::new(JsonPath::root().push_field("email"), "invalid format")
            .with_expected("email address")
            .with_got("not-an-email");

        assert_eq!(
            error.to_string(),
            "email: invalid format (expected: email address) (got: not-an-email)"
        );
    }

    #[test]
    fn test_schema_error_display_root() {
        let error = SchemaError::new(JsonPath::root(), "Expected an object");
        assert_eq!(error.to_string(), "(root): Expected an object");
    }

    #[test]
    fn test_from_vec_empty_is_none() {
        assert!(SchemaErrors::from_vec(Vec::new()).is_none());
    }

    #[test]
    fn test_from_vec_preserves_order() {
        let errors = SchemaErrors::from_vec(vec![
            SchemaError::new(JsonPath::root().push_field("z"), "1"),
            SchemaError::new(JsonPath::root().push_field("a"), "2"),
        ])
        .unwrap();
        assert_eq!(errors.paths(), vec!["z", "a"]);
    }

    #[test]
    fn test_at_path_and_with_code() {
        let path_a = JsonPath::root().push_field("a");
        let errors = SchemaErrors::single(SchemaError::new(path_a.clone(), "1").with_code("x"))
            .combine(SchemaErrors::single(
                SchemaError::new(path_a.clone(), "2").with_code("y"),
            ))
            .combine(SchemaErrors::single(
                SchemaError::new(JsonPath::root().push_field("b"), "3").with_code("x"),
            ));

        assert_eq!(errors.at_path(&path_a).len(), 2);
        assert_eq!(errors.with_code("x").len(), 2);
        assert_eq!(errors.with_code("y").len(), 1);
    }

    #[test]
    fn test_message_prefix_keeps_paths_and_order() {
        let errors = SchemaErrors::single(SchemaError::new(JsonPath::root(), "first")).combine(
            SchemaErrors::single(SchemaError::new(JsonPath::root().push_index(3), "second")),
        );

        let prefixed = errors.with_message_prefix("Option A: ");
        let messages: Vec<_> = prefixed.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["Option A: first", "Option A: second"]);
        assert_eq!(prefixed.paths(), vec!["", "[3]"]);
    }

    #[test]
    fn test_schema_errors_display() {
        let errors = SchemaErrors::single(SchemaError::new(
            JsonPath::root().push_field("name"),
            "required",
        ))
        .combine(SchemaErrors::single(SchemaError::new(
            JsonPath::root().push_field("email"),
            "invalid",
        )));
        let display = errors.to_string();

        assert!(display.contains("2 error(s)"));
        assert!(display.contains("1. name: required"));
        assert!(display.contains("2. email: invalid"));
    }
}
