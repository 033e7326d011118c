use crate::models::linear::{LinearRegression, LogisticRegression};
use crate::models::model::{Model, Task};
use crate::models::tree::{DecisionTree, RandomForest};
use serde::{Deserialize, Serialize};
use std::io::Read;
use strum_macros::{Display, EnumDiscriminants, EnumString, IntoStaticStr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("invalid artifact json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

fn default_threshold() -> f64 {
    0.5
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearRegressionParams {
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogisticRegressionParams {
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
    /// Probability at or above which the label is 1.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

/// One node of a flattened tree. A node without `feature` is a leaf and only
/// its `value` is read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<usize>,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<usize>,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionTreeParams {
    pub n_features: usize,
    pub task: Task,
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RandomForestParams {
    pub n_features: usize,
    pub task: Task,
    pub trees: Vec<Vec<TreeNode>>,
}

/// On-disk description of a fitted model.
///
/// ```json
/// { "type": "linear-regression", "params": { "coefficients": [1.2, 3.4], "intercept": 0.5 } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(ArtifactKind))]
#[strum_discriminants(derive(EnumString, Display, IntoStaticStr))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum ModelArtifact {
    LinearRegression(LinearRegressionParams),
    LogisticRegression(LogisticRegressionParams),
    DecisionTree(DecisionTreeParams),
    RandomForest(RandomForestParams),
}

impl ModelArtifact {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ArtifactError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json(s: &str) -> Result<Self, ArtifactError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn kind(&self) -> ArtifactKind {
        ArtifactKind::from(self)
    }
}

/// Turns a parsed artifact into a ready-to-use model, validating its
/// parameters on the way.
pub fn build_model(artifact: ModelArtifact) -> Result<Box<dyn Model>, ArtifactError> {
    match artifact {
        ModelArtifact::LinearRegression(p) => Ok(Box::new(LinearRegression::try_from(p)?)),
        ModelArtifact::LogisticRegression(p) => Ok(Box::new(LogisticRegression::try_from(p)?)),
        ModelArtifact::DecisionTree(p) => Ok(Box::new(DecisionTree::try_from(p)?)),
        ModelArtifact::RandomForest(p) => Ok(Box::new(RandomForest::try_from(p)?)),
    }
}
