//! Named references into a [`SchemaRegistry`](crate::SchemaRegistry).
//!
//! A [`RefSchema`] resolves its target by name every time it validates, so a
//! schema can refer to itself (directly or through others) and describe
//! recursive structures such as trees.

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::{SchemaLike, ValueValidator};

pub(crate) type SchemaMap = RwLock<HashMap<String, Arc<dyn ValueValidator>>>;

thread_local! {
    // Reference resolutions currently on this thread's stack.
    static ACTIVE_RESOLUTIONS: Cell<usize> = const { Cell::new(0) };
}

struct ResolutionGuard;

impl ResolutionGuard {
    fn enter() -> (Self, usize) {
        let depth = ACTIVE_RESOLUTIONS.with(|d| {
            let next = d.get() + 1;
            d.set(next);
            next
        });
        (ResolutionGuard, depth)
    }
}

impl Drop for ResolutionGuard {
    fn drop(&mut self) {
        ACTIVE_RESOLUTIONS.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// A schema that delegates to a registered schema by name.
///
/// Created with [`SchemaRegistry::reference`](crate::SchemaRegistry::reference).
/// The reference holds only a weak handle to the registry's storage; once the
/// registry and all its clones are dropped, validation fails with
/// `missing_reference`.
///
/// Validation fails with `max_depth_exceeded` when the value is nested deeper
/// than the registry's maximum depth, or when references keep resolving to
/// one another that many times without descending into the value.
///
/// # Example
///
/// ```rust
/// use pathwise::{Schema, SchemaRegistry};
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
/// registry.register("Node", Schema::object()
///     .field("value", Schema::number())
///     .optional("next", registry.reference("Node"))
/// ).unwrap();
///
/// let list = json!({"value": 1, "next": {"value": 2, "next": {"value": "x"}}});
/// let errors = registry.validate("Node", &list).unwrap().into_result().unwrap_err();
/// assert_eq!(errors.first().path.to_string(), "next.next.value");
/// ```
pub struct RefSchema {
    name: String,
    schemas: Weak<SchemaMap>,
    max_depth: usize,
}

impl RefSchema {
    pub(crate) fn new(name: impl Into<String>, schemas: Weak<SchemaMap>, max_depth: usize) -> Self {
        Self {
            name: name.into(),
            schemas,
            max_depth,
        }
    }

    /// Returns the name of the referenced schema.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self) -> Option<Arc<dyn ValueValidator>> {
        let schemas = self.schemas.upgrade()?;
        let target = schemas.read().get(&self.name).cloned();
        target
    }

    fn depth_exceeded(&self, path: &JsonPath) -> SchemaErrors {
        SchemaErrors::single(
            SchemaError::new(
                path.clone(),
                format!(
                    "Maximum reference depth {} exceeded resolving '{}'",
                    self.max_depth, self.name
                ),
            )
            .with_code("max_depth_exceeded"),
        )
    }
}

impl SchemaLike for RefSchema {
    type Output = Value;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        if path.len() > self.max_depth {
            return Validation::Failure(self.depth_exceeded(path));
        }

        let (_guard, active) = ResolutionGuard::enter();
        if active > self.max_depth {
            return Validation::Failure(self.depth_exceeded(path));
        }

        match self.resolve() {
            Some(schema) => {
                tracing::trace!(%path, name = %self.name, "resolved schema reference");
                schema.validate_value(value, path)
            }
            None => Validation::Failure(SchemaErrors::single(
                SchemaError::new(
                    path.clone(),
                    format!("Schema '{}' is not registered", self.name),
                )
                .with_code("missing_reference"),
            )),
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        SchemaLike::validate(self, value, path)
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        refs.push(self.name.clone());
    }
}
