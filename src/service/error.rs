use crate::features::FeatureSchema;
use crate::models::{ArtifactError, Task};
use std::path::PathBuf;
use strum_macros::{Display, IntoStaticStr};
use thiserror::Error;

/// Which of the two models an artifact is loaded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ModelRole {
    Scorer,
    Classifier,
}

impl ModelRole {
    pub fn expected_task(self) -> Task {
        match self {
            ModelRole::Scorer => Task::Regression,
            ModelRole::Classifier => Task::Classification,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{role} model not found at {}", .path.display())]
    NotFound { role: ModelRole, path: PathBuf },

    #[error(
        "{role} model {} expects {found} features but the {schema} panel provides {expected}",
        .path.display()
    )]
    IncompatibleSchema {
        role: ModelRole,
        path: PathBuf,
        schema: FeatureSchema,
        expected: usize,
        found: usize,
    },

    #[error("{role} model {} is a {found} model, expected {expected}", .path.display())]
    WrongRole {
        role: ModelRole,
        path: PathBuf,
        expected: Task,
        found: Task,
    },

    #[error("{role} model {} is malformed: {source}", .path.display())]
    Malformed {
        role: ModelRole,
        path: PathBuf,
        #[source]
        source: ArtifactError,
    },

    #[error("failed to read {role} model {}: {source}", .path.display())]
    Io {
        role: ModelRole,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    pub fn role(&self) -> ModelRole {
        match self {
            LoadError::NotFound { role, .. }
            | LoadError::IncompatibleSchema { role, .. }
            | LoadError::WrongRole { role, .. }
            | LoadError::Malformed { role, .. }
            | LoadError::Io { role, .. } => *role,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictionError {
    #[error("prediction is unavailable: {reason}")]
    ModelUnavailable { reason: String },

    #[error("expected {expected} features, got {found}")]
    ShapeMismatch { expected: usize, found: usize },
}
