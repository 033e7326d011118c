mod feature_vector;
mod field_spec;
mod panel;
mod validation;

pub use feature_vector::{FeatureParseError, FeatureVector};
pub use field_spec::{FieldSpec, SchemaError};
pub use panel::{FeatureSchema, FiveMarkerInputs, MarkerPanel, TwoMarkerInputs};
pub use validation::{FieldViolation, ValidationError, validate};
