//! Error types for validation failures.
//!
//! Every failure is a returned value carrying a path and a message; nothing in
//! the validation path panics or returns `Err`.

mod schema_error;

pub use schema_error::{SchemaError, SchemaErrors};
