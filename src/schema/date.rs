//! Date leaf: ISO-8601 calendar date strings.

use chrono::NaiveDate;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::SchemaLike;
use super::type_error;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A leaf parsing `YYYY-MM-DD` strings into [`NaiveDate`], with an optional
/// inclusive range.
///
/// ```rust
/// use chrono::NaiveDate;
/// use pathwise::{validate, Schema};
/// use serde_json::json;
///
/// let schema = Schema::date().min(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
///
/// assert!(validate(&schema, &json!("2024-02-29")).is_success());
/// assert!(validate(&schema, &json!("1999-12-31")).is_failure());
/// assert!(validate(&schema, &json!("2023-02-29")).is_failure());
/// ```
#[derive(Clone, Default)]
pub struct DateSchema {
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
}

impl DateSchema {
    /// Creates a schema accepting any valid date.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects dates before `min`.
    pub fn min(mut self, min: NaiveDate) -> Self {
        self.min = Some(min);
        self
    }

    /// Rejects dates after `max`.
    pub fn max(mut self, max: NaiveDate) -> Self {
        self.max = Some(max);
        self
    }
}

impl SchemaLike for DateSchema {
    type Output = NaiveDate;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<NaiveDate, SchemaErrors> {
        let s = match value.as_str() {
            Some(s) => s,
            None => {
                return Validation::Failure(type_error(
                    path,
                    None,
                    "Expected a date string",
                    "date string",
                    value,
                ))
            }
        };
        let date = match NaiveDate::parse_from_str(s, DATE_FORMAT) {
            Ok(date) => date,
            Err(_) => {
                return Validation::Failure(SchemaErrors::single(
                    SchemaError::new(path.clone(), "Invalid date")
                        .with_code("invalid_date")
                        .with_expected("YYYY-MM-DD")
                        .with_got(s),
                ))
            }
        };

        let mut errors = Vec::new();
        if let Some(min) = self.min.filter(|min| date < *min) {
            errors.push(
                SchemaError::new(path.clone(), format!("date must be on or after {}", min))
                    .with_code("min_value")
                    .with_expected(format!(">= {}", min))
                    .with_got(s),
            );
        }
        if let Some(max) = self.max.filter(|max| date > *max) {
            errors.push(
                SchemaError::new(path.clone(), format!("date must be on or before {}", max))
                    .with_code("max_value")
                    .with_expected(format!("<= {}", max))
                    .with_got(s),
            );
        }

        match SchemaErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(date),
        }
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        SchemaLike::validate(self, value, path)
            .map(|date| Value::String(date.format(DATE_FORMAT).to_string()))
    }
}
