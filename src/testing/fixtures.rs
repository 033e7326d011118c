use crate::features::FeatureSchema;
use crate::models::{LinearRegressionParams, LogisticRegressionParams, ModelArtifact};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scorer whose weights are all non-zero, so every feature moves the score.
pub fn linear_scorer(width: usize) -> ModelArtifact {
    ModelArtifact::LinearRegression(LinearRegressionParams {
        coefficients: (0..width).map(|i| 0.75 + i as f64 * 0.5).collect(),
        intercept: 1.25,
    })
}

pub fn logistic_classifier(width: usize) -> ModelArtifact {
    ModelArtifact::LogisticRegression(LogisticRegressionParams {
        coefficients: (0..width).map(|i| if i % 2 == 0 { 0.2 } else { 1.5 }).collect(),
        intercept: -2.0,
        threshold: 0.5,
    })
}

pub fn write_artifact(dir: &Path, file_name: &str, artifact: &ModelArtifact) -> PathBuf {
    let path = dir.join(file_name);
    let json = serde_json::to_string_pretty(artifact).expect("artifact serializes");
    fs::write(&path, json).expect("artifact written");
    path
}

/// Temporary directory holding a matching scorer/classifier pair.
pub struct ArtifactDir {
    dir: TempDir,
    pub scorer: PathBuf,
    pub classifier: PathBuf,
}

impl ArtifactDir {
    pub fn for_schema(schema: FeatureSchema) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let scorer = write_artifact(
            dir.path(),
            "easi_prediction_model.json",
            &linear_scorer(schema.width()),
        );
        let classifier = write_artifact(
            dir.path(),
            "flare_prediction_model.json",
            &logistic_classifier(schema.width()),
        );
        Self {
            dir,
            scorer,
            classifier,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
