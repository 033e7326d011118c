use crate::config::Config;
use crate::features::{FeatureSchema, FeatureVector};
use crate::service::error::{LoadError, PredictionError};
use crate::service::handles::{ClassifierHandle, ScorerHandle, load_models};
use crate::service::result::PredictionResult;
use log::{debug, info, warn};
use std::path::Path;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ServiceStatus {
    Unready,
    Ready,
}

enum ServiceState {
    Unready { reason: Option<String> },
    Ready {
        scorer: ScorerHandle,
        classifier: ClassifierHandle,
    },
}

/// Owns the scorer and classifier for one marker panel.
///
/// Starts `Unready` and moves to `Ready` once both models load; there is no
/// way back. A service whose load failed stays usable as a value and answers
/// every prediction with [`PredictionError::ModelUnavailable`].
pub struct PredictionService {
    schema: FeatureSchema,
    state: ServiceState,
}

impl PredictionService {
    pub fn new(schema: FeatureSchema) -> Self {
        Self {
            schema,
            state: ServiceState::Unready { reason: None },
        }
    }

    /// Builds and loads in one step. Never fails; check [`is_ready`](Self::is_ready).
    pub fn from_paths(schema: FeatureSchema, scorer_path: &Path, classifier_path: &Path) -> Self {
        let mut service = Self::new(schema);
        if let Err(e) = service.load(scorer_path, classifier_path) {
            debug!("Service for the {schema} panel starts unready: {e}");
        }
        service
    }

    pub fn from_config(config: &Config) -> Self {
        Self::from_paths(config.panel, &config.scorer_path, &config.classifier_path)
    }

    /// Service built from already-constructed handles. Handles prepared for
    /// another panel are rejected the same way a mismatched artifact is.
    pub fn from_handles(
        schema: FeatureSchema,
        scorer: ScorerHandle,
        classifier: ClassifierHandle,
    ) -> Result<Self, LoadError> {
        scorer.ensure_schema(schema)?;
        classifier.ensure_schema(schema)?;
        Ok(Self {
            schema,
            state: ServiceState::Ready { scorer, classifier },
        })
    }

    /// Loads both artifacts. On success the service becomes `Ready`; on
    /// failure it stays `Unready` and remembers why.
    pub fn load(&mut self, scorer_path: &Path, classifier_path: &Path) -> Result<(), LoadError> {
        if self.is_ready() {
            warn!(
                "Models already loaded; ignoring request to load {} and {}",
                scorer_path.display(),
                classifier_path.display()
            );
            return Ok(());
        }

        match load_models(scorer_path, classifier_path, self.schema) {
            Ok((scorer, classifier)) => {
                info!("Prediction service ready ({} panel)", self.schema);
                self.state = ServiceState::Ready { scorer, classifier };
                Ok(())
            }
            Err(e) => {
                warn!("Prediction disabled: {e}");
                self.state = ServiceState::Unready {
                    reason: Some(e.to_string()),
                };
                Err(e)
            }
        }
    }

    pub fn schema(&self) -> FeatureSchema {
        self.schema
    }

    pub fn status(&self) -> ServiceStatus {
        match self.state {
            ServiceState::Unready { .. } => ServiceStatus::Unready,
            ServiceState::Ready { .. } => ServiceStatus::Ready,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status() == ServiceStatus::Ready
    }

    /// Why predictions are disabled, if they are.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.state {
            ServiceState::Unready { reason: Some(r) } => Some(r.as_str()),
            ServiceState::Unready { reason: None } => Some("models have not been loaded"),
            ServiceState::Ready { .. } => None,
        }
    }

    /// Scores `features` with both models. Values are passed through as given;
    /// range checking is the caller's job.
    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionResult, PredictionError> {
        let ServiceState::Ready { scorer, classifier } = &self.state else {
            return Err(PredictionError::ModelUnavailable {
                reason: self.unavailable_reason().unwrap_or_default().to_string(),
            });
        };

        if features.len() != self.schema.width() {
            return Err(PredictionError::ShapeMismatch {
                expected: self.schema.width(),
                found: features.len(),
            });
        }

        let x = features.as_slice();
        let result = PredictionResult {
            score: scorer.score(x)?,
            risk: classifier.classify(x)?,
        };
        debug!(
            "predict {features} -> score={}, risk={}",
            result.score,
            result.risk.as_label()
        );
        Ok(result)
    }
}
