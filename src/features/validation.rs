use crate::features::FeatureVector;
use crate::features::field_spec::SchemaError;
use crate::features::panel::FeatureSchema;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// One field that fell outside its documented bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: String,
    pub value: f64,
    pub expected: String,
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {} (expected {})", self.field, self.value, self.expected)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("expected {expected} values for the {schema} panel, got {found}")]
    WrongLength {
        schema: FeatureSchema,
        expected: usize,
        found: usize,
    },

    #[error("out of range: {}", join(.0))]
    OutOfRange(Vec<FieldViolation>),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

fn join(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Caller-side check of a vector against the documented bounds of `schema`.
///
/// Every offending field is reported; nothing is clamped. The prediction
/// service never runs this itself.
pub fn validate(schema: FeatureSchema, features: &FeatureVector) -> Result<(), ValidationError> {
    if features.len() != schema.width() {
        return Err(ValidationError::WrongLength {
            schema,
            expected: schema.width(),
            found: features.len(),
        });
    }

    let violations: Vec<FieldViolation> = schema
        .fields()?
        .into_iter()
        .zip(features.as_slice())
        .filter(|(spec, value)| !spec.contains(**value))
        .map(|(spec, value)| FieldViolation {
            expected: spec.range_label(),
            field: spec.name,
            value: *value,
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange(violations))
    }
}
