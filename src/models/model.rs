use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// What kind of output a fitted model produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Task {
    /// Unbounded real output.
    Regression,
    /// Class label, always exactly `0.0` or `1.0`.
    Classification,
}

/// A pre-fitted, read-only prediction function.
///
/// Implementations never mutate themselves after construction, so a single
/// instance can be shared by every request for the life of the process.
pub trait Model: Send + Sync {
    /// Number of features the model was fitted against.
    fn input_width(&self) -> usize;

    fn task(&self) -> Task;

    /// Predicts for one row. Callers guarantee `features.len() == input_width()`.
    fn predict(&self, features: &[f64]) -> f64;
}
