//! Named schema storage and reference resolution.
//!
//! This module provides the [`SchemaRegistry`] type that stores named schemas
//! and hands out [`RefSchema`] references that resolve against it during
//! validation.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use stillwater::Validation;

use crate::error::SchemaErrors;
use crate::schema::{RefSchema, SchemaLike, SchemaMap, ValueValidator};

const DEFAULT_MAX_DEPTH: usize = 128;

/// A thread-safe registry for storing and retrieving named schemas.
///
/// The registry enables schema reuse and recursion through references.
/// Schemas are registered under string names and referenced from other
/// schemas with [`SchemaRegistry::reference`].
///
/// # Thread Safety
///
/// Storage sits behind an `Arc<RwLock<...>>`:
/// - Any number of threads can validate concurrently (read access)
/// - Registration is serialized (write access)
///
/// Clones share the same storage.
///
/// # Example
///
/// ```rust
/// use pathwise::{Schema, SchemaRegistry};
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
/// registry.register("UserId", Schema::integer().positive()).unwrap();
/// registry.register("User", Schema::object()
///     .field("id", registry.reference("UserId"))
///     .field("name", Schema::string().min_len(1))
/// ).unwrap();
///
/// let result = registry.validate("User", &json!({"id": 7, "name": "Ada"})).unwrap();
/// assert!(result.is_success());
/// ```
pub struct SchemaRegistry {
    schemas: Arc<SchemaMap>,
    max_depth: usize,
}

impl SchemaRegistry {
    /// Creates an empty registry with the default maximum depth (128).
    pub fn new() -> Self {
        Self {
            schemas: Arc::new(RwLock::new(HashMap::new())),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum depth at which references still resolve.
    ///
    /// Only references created after this call observe the new limit.
    ///
    /// ```rust
    /// use pathwise::SchemaRegistry;
    ///
    /// let registry = SchemaRegistry::new().with_max_depth(32);
    /// assert_eq!(registry.max_depth(), 32);
    /// ```
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Returns the maximum reference depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Registers a schema under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already taken;
    /// the existing schema is left in place.
    ///
    /// ```rust
    /// use pathwise::{Schema, SchemaRegistry};
    ///
    /// let registry = SchemaRegistry::new();
    /// registry.register("Email", Schema::string()).unwrap();
    /// assert!(registry.register("Email", Schema::string()).is_err());
    /// ```
    pub fn register<S>(&self, name: impl Into<String>, schema: S) -> Result<(), RegistryError>
    where
        S: SchemaLike + 'static,
    {
        let name = name.into();
        let mut schemas = self.schemas.write();

        if schemas.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        tracing::debug!(name = %name, "registered schema");
        schemas.insert(name, Arc::new(schema));
        Ok(())
    }

    /// Retrieves a registered schema by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ValueValidator>> {
        self.schemas.read().get(name).cloned()
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.read().contains_key(name)
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.schemas.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Creates a reference to the schema registered (now or later) as `name`.
    ///
    /// The name is resolved at validation time, so a schema may reference
    /// itself or a schema registered after it.
    pub fn reference(&self, name: impl Into<String>) -> RefSchema {
        RefSchema::new(name, Arc::downgrade(&self.schemas), self.max_depth)
    }

    /// Lists referenced names that are not registered, sorted and deduplicated.
    ///
    /// Call after registration is complete to catch typos before validating.
    ///
    /// ```rust
    /// use pathwise::{Schema, SchemaRegistry};
    ///
    /// let registry = SchemaRegistry::new();
    /// registry.register("User", Schema::object()
    ///     .field("id", registry.reference("UserId"))
    /// ).unwrap();
    ///
    /// assert_eq!(registry.unresolved_refs(), vec!["UserId"]);
    /// ```
    pub fn unresolved_refs(&self) -> Vec<String> {
        let schemas = self.schemas.read();
        let mut all_refs = Vec::new();
        for schema in schemas.values() {
            schema.collect_value_refs(&mut all_refs);
        }

        let mut unresolved: Vec<String> = all_refs
            .into_iter()
            .filter(|name| !schemas.contains_key(name))
            .collect();
        unresolved.sort();
        unresolved.dedup();
        unresolved
    }

    /// Validates `value` against the schema registered as `schema_name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::SchemaNotFound` if no schema has that name.
    /// Validation failures are reported inside the returned `Validation`.
    pub fn validate(
        &self,
        schema_name: &str,
        value: &Value,
    ) -> Result<Validation<Value, SchemaErrors>, RegistryError> {
        let schema = self
            .get(schema_name)
            .ok_or_else(|| RegistryError::SchemaNotFound(schema_name.to_string()))?;

        Ok(crate::validate(&schema, value))
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SchemaRegistry {
    fn clone(&self) -> Self {
        Self {
            schemas: Arc::clone(&self.schemas),
            max_depth: self.max_depth,
        }
    }
}

/// Errors from registry operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A schema with this name is already registered.
    #[error("schema '{0}' already registered")]
    DuplicateName(String),

    /// No schema with this name is registered.
    #[error("schema '{0}' not found")]
    SchemaNotFound(String),
}
