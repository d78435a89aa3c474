//! Feature Validator
//!
//! Converts an untyped JSON object into a [`FeatureRecord`]. Every field in
//! the layout is required; unknown keys are ignored. All field problems are
//! collected so the caller gets a complete report in one response.

use serde::Serialize;
use serde_json::{Number, Value};

use super::layout::{FieldKind, FEATURE_COUNT, FEATURE_LAYOUT};
use super::record::FeatureRecord;

/// Allowed values for binary indicator fields
pub const BINARY_RANGE: &str = "[0,1]";

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("request body must be a JSON object, got {received}")]
    NotAnObject { received: &'static str },

    #[error("{field}: field required")]
    MissingField { field: &'static str },

    #[error("{field}: expected {expected}, got {received}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        received: &'static str,
    },

    #[error("{field}: value {value} outside allowed range {allowed}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        allowed: &'static str,
    },
}

impl ValidationError {
    /// Field the error refers to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::NotAnObject { .. } => None,
            ValidationError::MissingField { field }
            | ValidationError::WrongType { field, .. }
            | ValidationError::OutOfRange { field, .. } => Some(*field),
        }
    }
}

/// Non-empty set of validation failures for one request
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{} validation error(s): {}", .0.len(), summary(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

fn summary(errors: &[ValidationError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ")
}

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.0
    }

    /// First error reported for `field`
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field() == Some(field))
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Validate a raw request body into a fully-populated record
pub fn validate(raw: &Value) -> Result<FeatureRecord, ValidationErrors> {
    let object = match raw {
        Value::Object(map) => map,
        other => {
            return Err(ValidationErrors(vec![ValidationError::NotAnObject {
                received: json_type_name(other),
            }]))
        }
    };

    let mut values = [0.0f64; FEATURE_COUNT];
    let mut errors = Vec::new();

    for (i, &(field, kind)) in FEATURE_LAYOUT.iter().enumerate() {
        match object.get(field) {
            None => errors.push(ValidationError::MissingField { field }),
            Some(value) => match coerce_field(field, kind, value) {
                Ok(v) => values[i] = v,
                Err(e) => errors.push(e),
            },
        }
    }

    if errors.is_empty() {
        Ok(FeatureRecord::from_values(values))
    } else {
        Err(ValidationErrors(errors))
    }
}

fn coerce_field(field: &'static str, kind: FieldKind, value: &Value) -> Result<f64, ValidationError> {
    let number = match value {
        Value::Number(n) => n,
        other => {
            return Err(ValidationError::WrongType {
                field,
                expected: kind.as_str(),
                received: json_type_name(other),
            })
        }
    };

    let v = number_to_f64(number).ok_or(ValidationError::WrongType {
        field,
        expected: kind.as_str(),
        received: "non-finite number",
    })?;

    match kind {
        FieldKind::Continuous => Ok(v),
        FieldKind::Integer => {
            if v.fract() == 0.0 {
                Ok(v)
            } else {
                Err(ValidationError::WrongType {
                    field,
                    expected: kind.as_str(),
                    received: "float",
                })
            }
        }
        FieldKind::Binary => {
            if v == 0.0 || v == 1.0 {
                Ok(v)
            } else {
                Err(ValidationError::OutOfRange {
                    field,
                    value: v,
                    allowed: BINARY_RANGE,
                })
            }
        }
    }
}

fn number_to_f64(n: &Number) -> Option<f64> {
    n.as_i64()
        .map(|i| i as f64)
        .or_else(|| n.as_u64().map(|u| u as f64))
        .or_else(|| n.as_f64())
        .filter(|v| v.is_finite())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
