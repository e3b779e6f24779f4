//! Array aggregation.
//!
//! [`ArraySchema`] applies one item validator to every element, extending the
//! path with the element's index, and reports the failures of all elements.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::SchemaLike;
use super::type_error;

enum ArrayConstraint {
    MinLength { min: usize, message: Option<String> },
    MaxLength { max: usize, message: Option<String> },
    Unique { message: Option<String> },
}

/// A schema for validating sequences.
///
/// Length constraints are reported at the array's own path ahead of item
/// errors; uniqueness violations follow the item errors. An empty array with
/// no length constraint is valid.
///
/// # Example
///
/// ```rust
/// use pathwise::{validate, Schema};
/// use serde_json::json;
///
/// let schema = Schema::array(Schema::number().positive());
///
/// assert_eq!(validate(&schema, &json!([])).into_result().unwrap(), Vec::<f64>::new());
///
/// let errors = validate(&schema, &json!([1, -2, 3, -4])).into_result().unwrap_err();
/// assert_eq!(errors.paths(), vec!["[1]", "[3]"]);
/// ```
pub struct ArraySchema<S> {
    item_schema: S,
    constraints: Vec<ArrayConstraint>,
    type_error_message: Option<String>,
}

impl<S: SchemaLike> ArraySchema<S> {
    /// Creates a new array schema with the given item schema.
    pub fn new(item_schema: S) -> Self {
        Self {
            item_schema,
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// Requires at least `min` items.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(ArrayConstraint::MinLength { min, message: None });
        self
    }

    /// Requires at most `max` items.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(ArrayConstraint::MaxLength { max, message: None });
        self
    }

    /// Equivalent to `.min_len(1)`.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Requires all items to be distinct by JSON equality.
    pub fn unique(mut self) -> Self {
        self.constraints
            .push(ArrayConstraint::Unique { message: None });
        self
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// With no constraints yet, sets the message used when the value is not
    /// an array.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.constraints.last_mut() {
            Some(ArrayConstraint::MinLength { message: m, .. })
            | Some(ArrayConstraint::MaxLength { message: m, .. })
            | Some(ArrayConstraint::Unique { message: m }) => *m = Some(message.into()),
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    /// Validates a value against this schema, producing the typed items.
    pub fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
    ) -> Validation<Vec<S::Output>, SchemaErrors> {
        self.validate_items(value, path, |schema, item, item_path| {
            schema.validate(item, item_path)
        })
    }

    fn validate_items<T>(
        &self,
        value: &Value,
        path: &JsonPath,
        validate_item: impl Fn(&S, &Value, &JsonPath) -> Validation<T, SchemaErrors>,
    ) -> Validation<Vec<T>, SchemaErrors> {
        let arr = match value.as_array() {
            Some(a) => a,
            None => {
                return Validation::Failure(type_error(
                    path,
                    self.type_error_message.as_deref(),
                    "Expected an array",
                    "array",
                    value,
                ))
            }
        };

        let mut errors: Vec<SchemaError> = self
            .constraints
            .iter()
            .filter_map(|c| check_length(c, arr.len(), path))
            .collect();

        let mut validated_items = Vec::with_capacity(arr.len());
        for (index, item) in arr.iter().enumerate() {
            let item_path = path.push_index(index);
            match validate_item(&self.item_schema, item, &item_path) {
                Validation::Success(v) => validated_items.push(v),
                Validation::Failure(e) => errors.extend(e),
            }
        }

        for constraint in &self.constraints {
            if let ArrayConstraint::Unique { message } = constraint {
                for indices in find_duplicates(arr) {
                    let msg = message
                        .clone()
                        .unwrap_or_else(|| format!("duplicate value at indices {:?}", indices));
                    errors.push(
                        SchemaError::new(path.clone(), msg)
                            .with_code("unique")
                            .with_got(format!("duplicates at indices {:?}", indices)),
                    );
                }
            }
        }

        match SchemaErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(validated_items),
        }
    }
}

impl<S: SchemaLike> SchemaLike for ArraySchema<S> {
    type Output = Vec<S::Output>;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate_items(value, path, |schema, item, item_path| {
            schema.validate_to_value(item, item_path)
        })
        .map(Value::Array)
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        self.item_schema.collect_refs(refs);
    }
}

fn check_length(constraint: &ArrayConstraint, len: usize, path: &JsonPath) -> Option<SchemaError> {
    match constraint {
        ArrayConstraint::MinLength { min, message } if len < *min => {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("array must have at least {} items, got {}", min, len));
            Some(
                SchemaError::new(path.clone(), msg)
                    .with_code("min_length")
                    .with_expected(format!("at least {} items", min))
                    .with_got(format!("{} items", len)),
            )
        }
        ArrayConstraint::MaxLength { max, message } if len > *max => {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("array must have at most {} items, got {}", max, len));
            Some(
                SchemaError::new(path.clone(), msg)
                    .with_code("max_length")
                    .with_expected(format!("at most {} items", max))
                    .with_got(format!("{} items", len)),
            )
        }
        _ => None,
    }
}

/// Returns the index groups of repeated values, ordered by first occurrence.
///
/// Items are compared with `Value` equality, so records with the same entries
/// in a different key order are duplicates.
fn find_duplicates(arr: &[Value]) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (i, item) in arr.iter().enumerate() {
        match groups.iter_mut().find(|g| arr[g[0]] == *item) {
            Some(group) => group.push(i),
            None => groups.push(vec![i]),
        }
    }
    groups.retain(|g| g.len() > 1);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NumberSchema, ObjectSchema, StringSchema};
    use serde_json::json;

    fn unwrap_success<T, E: std::fmt::Debug>(v: Validation<T, E>) -> T {
        v.into_result().unwrap()
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_accepts_array() {
        let schema = ArraySchema::new(StringSchema::new());
        let items = unwrap_success(schema.validate(&json!(["hello", "world"]), &JsonPath::root()));
        assert_eq!(items, vec!["hello".to_string(), "world".to_string()]);
    }

    #[test]
    fn test_empty_array_is_valid() {
        let schema = ArraySchema::new(StringSchema::new());
        let items = unwrap_success(schema.validate_to_value(&json!([]), &JsonPath::root()));
        assert_eq!(items, json!([]));
    }

    #[test]
    fn test_rejects_non_array() {
        let schema = ArraySchema::new(StringSchema::new());
        for value in [json!("x"), json!(42), json!(null), json!({"k": "v"})] {
            let errors = unwrap_failure(schema.validate(&value, &JsonPath::root()));
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.first().message, "Expected an array");
        }
    }

    #[test]
    fn test_accumulates_all_item_errors_in_index_order() {
        let schema = ArraySchema::new(NumberSchema::new().positive());
        let errors = unwrap_failure(schema.validate(&json!([-1, 2, -3, "x"]), &JsonPath::root()));
        assert_eq!(errors.paths(), vec!["[0]", "[2]", "[3]"]);
    }

    #[test]
    fn test_nested_objects_paths() {
        let user = ObjectSchema::new()
            .field("name", StringSchema::new().min_len(1))
            .field("age", NumberSchema::new().positive());
        let schema = ArraySchema::new(user);

        let path = JsonPath::root().push_field("users");
        let errors = unwrap_failure(schema.validate(
            &json!([{"name": "", "age": 30}, {"name": "Bob", "age": -5}]),
            &path,
        ));
        assert_eq!(errors.paths(), vec!["users[0].name", "users[1].age"]);
    }

    #[test]
    fn test_to_value_keeps_transformed_items() {
        let schema = ArraySchema::new(crate::schema::NumericStringSchema::new());
        let items =
            unwrap_success(schema.validate_to_value(&json!(["1", "2.5"]), &JsonPath::root()));
        assert_eq!(items, json!([1, 2.5]));
    }

    #[test]
    fn test_length_errors_precede_item_errors() {
        let schema = ArraySchema::new(NumberSchema::new().positive()).min_len(3);
        let errors = unwrap_failure(schema.validate(&json!([-1, -2]), &JsonPath::root()));
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.first().code, "min_length");
        assert_eq!(errors.paths(), vec!["", "[0]", "[1]"]);
    }

    #[test]
    fn test_unique_reports_each_duplicate_group() {
        let schema = ArraySchema::new(StringSchema::new()).unique();
        let errors = unwrap_failure(
            schema.validate(&json!(["a", "b", "a", "b", "c"]), &JsonPath::root()),
        );
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.first().got, Some("duplicates at indices [0, 2]".to_string()));
    }

    #[test]
    fn test_unique_ignores_record_key_order() {
        let schema = ArraySchema::new(ObjectSchema::new().passthrough()).unique();
        let errors = unwrap_failure(schema.validate(
            &json!([{"a": 1, "b": 2}, {"c": 3}, {"b": 2, "a": 1}]),
            &JsonPath::root(),
        ));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().code, "unique");
        assert_eq!(errors.first().got, Some("duplicates at indices [0, 2]".to_string()));
    }

    #[test]
    fn test_custom_messages() {
        let schema = ArraySchema::new(StringSchema::new())
            .error("must be a list of tags")
            .non_empty()
            .error("at least one tag is required");

        let errors = unwrap_failure(schema.validate(&json!("tags"), &JsonPath::root()));
        assert_eq!(errors.first().message, "must be a list of tags");

        let errors = unwrap_failure(schema.validate(&json!([]), &JsonPath::root()));
        assert_eq!(errors.first().message, "at least one tag is required");
    }
}
