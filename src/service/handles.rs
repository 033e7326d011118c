use crate::features::FeatureSchema;
use crate::models::{Model, ModelArtifact, build_model};
use crate::service::error::{LoadError, ModelRole, PredictionError};
use crate::service::result::RiskFlag;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

const IN_MEMORY: &str = "<in-memory>";

/// Loaded regression model producing the future EASI score.
pub struct ScorerHandle {
    model: Box<dyn Model>,
    origin: PathBuf,
}

/// Loaded classification model producing the flare-up label.
pub struct ClassifierHandle {
    model: Box<dyn Model>,
    origin: PathBuf,
}

impl ScorerHandle {
    pub fn load(path: &Path, schema: FeatureSchema) -> Result<Self, LoadError> {
        let model = load_model(ModelRole::Scorer, path, schema)?;
        Ok(Self {
            model,
            origin: path.to_path_buf(),
        })
    }

    /// Wraps an already-built model, applying the same checks as [`load`](Self::load).
    pub fn from_model(model: Box<dyn Model>, schema: FeatureSchema) -> Result<Self, LoadError> {
        check_model(ModelRole::Scorer, Path::new(IN_MEMORY), schema, model.as_ref())?;
        Ok(Self {
            model,
            origin: PathBuf::from(IN_MEMORY),
        })
    }

    pub fn input_width(&self) -> usize {
        self.model.input_width()
    }

    /// Where the model came from: its artifact path, or `<in-memory>`.
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    pub(crate) fn ensure_schema(&self, schema: FeatureSchema) -> Result<(), LoadError> {
        check_width(ModelRole::Scorer, &self.origin, schema, self.input_width())
    }

    pub fn score(&self, features: &[f64]) -> Result<f64, PredictionError> {
        check_shape(self.input_width(), features)?;
        Ok(self.model.predict(features))
    }
}

impl ClassifierHandle {
    pub fn load(path: &Path, schema: FeatureSchema) -> Result<Self, LoadError> {
        let model = load_model(ModelRole::Classifier, path, schema)?;
        Ok(Self {
            model,
            origin: path.to_path_buf(),
        })
    }

    pub fn from_model(model: Box<dyn Model>, schema: FeatureSchema) -> Result<Self, LoadError> {
        check_model(ModelRole::Classifier, Path::new(IN_MEMORY), schema, model.as_ref())?;
        Ok(Self {
            model,
            origin: PathBuf::from(IN_MEMORY),
        })
    }

    pub fn input_width(&self) -> usize {
        self.model.input_width()
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }

    pub(crate) fn ensure_schema(&self, schema: FeatureSchema) -> Result<(), LoadError> {
        check_width(ModelRole::Classifier, &self.origin, schema, self.input_width())
    }

    pub fn classify(&self, features: &[f64]) -> Result<RiskFlag, PredictionError> {
        check_shape(self.input_width(), features)?;
        Ok(RiskFlag::from_model_output(self.model.predict(features)))
    }
}

fn check_shape(expected: usize, features: &[f64]) -> Result<(), PredictionError> {
    if features.len() != expected {
        return Err(PredictionError::ShapeMismatch {
            expected,
            found: features.len(),
        });
    }
    Ok(())
}

/// Loads both artifacts and checks each against `schema`.
///
/// Each artifact is loaded on its own; when both fail, the scorer's error is
/// returned and the classifier's is logged.
pub fn load_models(
    scorer_path: &Path,
    classifier_path: &Path,
    schema: FeatureSchema,
) -> Result<(ScorerHandle, ClassifierHandle), LoadError> {
    let scorer = ScorerHandle::load(scorer_path, schema);
    let classifier = ClassifierHandle::load(classifier_path, schema);

    match (scorer, classifier) {
        (Ok(s), Ok(c)) => Ok((s, c)),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
        (Err(e), Err(other)) => {
            log::error!("{other}");
            Err(e)
        }
    }
}

fn load_model(role: ModelRole, path: &Path, schema: FeatureSchema) -> Result<Box<dyn Model>, LoadError> {
    let artifact = read_artifact(role, path)?;
    let kind = artifact.kind();
    let model = build_model(artifact).map_err(|source| LoadError::Malformed {
        role,
        path: path.to_path_buf(),
        source,
    })?;
    check_model(role, path, schema, model.as_ref())?;

    info!(
        "Loaded {role} model ({kind}, {} features) from {}",
        model.input_width(),
        path.display()
    );
    Ok(model)
}

fn read_artifact(role: ModelRole, path: &Path) -> Result<ModelArtifact, LoadError> {
    let not_found = || LoadError::NotFound {
        role,
        path: path.to_path_buf(),
    };

    if path.is_dir() {
        return Err(not_found());
    }
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => not_found(),
        _ => LoadError::Io {
            role,
            path: path.to_path_buf(),
            source,
        },
    })?;

    debug!("Parsing {role} artifact {}", path.display());
    ModelArtifact::from_reader(BufReader::new(file)).map_err(|source| LoadError::Malformed {
        role,
        path: path.to_path_buf(),
        source,
    })
}

fn check_model(
    role: ModelRole,
    path: &Path,
    schema: FeatureSchema,
    model: &dyn Model,
) -> Result<(), LoadError> {
    let expected_task = role.expected_task();
    if model.task() != expected_task {
        return Err(LoadError::WrongRole {
            role,
            path: PathBuf::from(path),
            expected: expected_task,
            found: model.task(),
        });
    }
    check_width(role, path, schema, model.input_width())
}

fn check_width(role: ModelRole, path: &Path, schema: FeatureSchema, found: usize) -> Result<(), LoadError> {
    if found != schema.width() {
        return Err(LoadError::IncompatibleSchema {
            role,
            path: PathBuf::from(path),
            schema,
            expected: schema.width(),
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use crate::testing::{ArtifactDir, ConstantModel, linear_scorer, logistic_classifier, write_artifact};
    use std::fs;

    #[test]
    fn loads_matching_artifacts() {
        let dir = ArtifactDir::for_schema(FeatureSchema::TwoMarker);
        let (s, c) = load_models(&dir.scorer, &dir.classifier, FeatureSchema::TwoMarker).unwrap();
        assert_eq!(s.input_width(), 2);
        assert_eq!(c.input_width(), 2);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = ArtifactDir::for_schema(FeatureSchema::TwoMarker);
        let missing = dir.path().join("nope.json");
        let err = ScorerHandle::load(&missing, FeatureSchema::TwoMarker).err().unwrap();
        assert!(matches!(err, LoadError::NotFound { role: ModelRole::Scorer, .. }));

        let err = ClassifierHandle::load(dir.path(), FeatureSchema::TwoMarker).err().unwrap();
        assert!(matches!(err, LoadError::NotFound { role: ModelRole::Classifier, .. }));
    }

    #[test]
    fn width_disagreement_is_incompatible_schema() {
        let dir = ArtifactDir::for_schema(FeatureSchema::TwoMarker);
        let err = ScorerHandle::load(&dir.scorer, FeatureSchema::FiveMarker).err().unwrap();
        match err {
            LoadError::IncompatibleSchema {
                schema,
                expected,
                found,
                ..
            } => {
                assert_eq!(schema, FeatureSchema::FiveMarker);
                assert_eq!(expected, 5);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn swapped_artifacts_are_wrong_role() {
        let dir = ArtifactDir::for_schema(FeatureSchema::TwoMarker);
        let err = ScorerHandle::load(&dir.classifier, FeatureSchema::TwoMarker).err().unwrap();
        assert!(matches!(
            err,
            LoadError::WrongRole {
                expected: Task::Regression,
                found: Task::Classification,
                ..
            }
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        let dir = ArtifactDir::for_schema(FeatureSchema::TwoMarker);
        let bad = dir.path().join("bad.json");
        fs::write(&bad, "not json at all").unwrap();
        let err = ClassifierHandle::load(&bad, FeatureSchema::TwoMarker).err().unwrap();
        assert!(matches!(err, LoadError::Malformed { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn both_failing_reports_scorer_first() {
        let dir = ArtifactDir::for_schema(FeatureSchema::TwoMarker);
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        let err = load_models(&a, &b, FeatureSchema::TwoMarker).err().unwrap();
        assert_eq!(err.role(), ModelRole::Scorer);
    }

    #[test]
    fn in_memory_models_get_the_same_checks() {
        let ok = ConstantModel::new(5, Task::Regression, 1.0);
        assert!(ScorerHandle::from_model(Box::new(ok), FeatureSchema::FiveMarker).is_ok());

        let narrow = ConstantModel::new(2, Task::Classification, 1.0);
        let err = ClassifierHandle::from_model(Box::new(narrow), FeatureSchema::FiveMarker)
            .err()
            .unwrap();
        assert!(err.to_string().contains("<in-memory>"));
    }

    #[test]
    fn handles_reject_wrong_length_instead_of_padding() {
        let dir = ArtifactDir::for_schema(FeatureSchema::TwoMarker);
        let (s, c) = load_models(&dir.scorer, &dir.classifier, FeatureSchema::TwoMarker).unwrap();

        assert_eq!(
            s.score(&[2.5]),
            Err(PredictionError::ShapeMismatch {
                expected: 2,
                found: 1
            })
        );
        assert!(matches!(
            s.score(&[2.5, 0.3, 99.0, 99.0]),
            Err(PredictionError::ShapeMismatch { found: 4, .. })
        ));
        assert!(matches!(
            c.classify(&[]),
            Err(PredictionError::ShapeMismatch { found: 0, .. })
        ));

        assert!(s.score(&[2.5, 0.3]).unwrap().is_finite());
        assert!(c.classify(&[2.5, 0.3]).is_ok());
    }

    #[test]
    fn handles_remember_their_origin() {
        let dir = ArtifactDir::for_schema(FeatureSchema::TwoMarker);
        let s = ScorerHandle::load(&dir.scorer, FeatureSchema::TwoMarker).unwrap();
        assert_eq!(s.origin(), dir.scorer.as_path());

        let c = ClassifierHandle::from_model(
            Box::new(ConstantModel::new(2, Task::Classification, 0.0)),
            FeatureSchema::TwoMarker,
        )
        .unwrap();
        assert_eq!(c.origin(), Path::new(IN_MEMORY));
    }

    #[test]
    fn written_fixtures_roundtrip_through_disk() {
        let dir = ArtifactDir::for_schema(FeatureSchema::FiveMarker);
        let p = write_artifact(dir.path(), "extra.json", &linear_scorer(5));
        assert!(ScorerHandle::load(&p, FeatureSchema::FiveMarker).is_ok());
        let p = write_artifact(dir.path(), "extra_cls.json", &logistic_classifier(5));
        assert!(ClassifierHandle::load(&p, FeatureSchema::FiveMarker).is_ok());
    }
}
