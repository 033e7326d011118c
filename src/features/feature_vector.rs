use crate::features::panel::{FiveMarkerInputs, MarkerPanel, TwoMarkerInputs};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::num::ParseFloatError;
use std::str::FromStr;
use thiserror::Error;

/// Ordered marker values handed to both models.
///
/// The vector carries no schema of its own: whether its length is acceptable
/// is decided by the service it is submitted to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[f64; N]> for FeatureVector {
    fn from(values: [f64; N]) -> Self {
        Self(values.to_vec())
    }
}

impl From<MarkerPanel> for FeatureVector {
    fn from(panel: MarkerPanel) -> Self {
        Self(panel.values())
    }
}

impl From<TwoMarkerInputs> for FeatureVector {
    fn from(inputs: TwoMarkerInputs) -> Self {
        MarkerPanel::TwoMarker(inputs).into()
    }
}

impl From<FiveMarkerInputs> for FeatureVector {
    fn from(inputs: FiveMarkerInputs) -> Self {
        MarkerPanel::FiveMarker(inputs).into()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FeatureParseError {
    #[error("no values given")]
    Empty,

    #[error("value #{position} ('{raw}') is not a number: {source}")]
    NotANumber {
        position: usize,
        raw: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Parses a comma separated list such as `2.5, 0.3`.
impl FromStr for FeatureVector {
    type Err = FeatureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(FeatureParseError::Empty);
        }
        s.split(',')
            .enumerate()
            .map(|(i, tok)| {
                let raw = tok.trim();
                raw.parse::<f64>()
                    .map_err(|source| FeatureParseError::NotANumber {
                        position: i + 1,
                        raw: raw.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(FeatureVector)
    }
}

impl Display for FeatureVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}
