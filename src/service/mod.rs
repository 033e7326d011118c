mod error;
mod handles;
mod prediction_service;
mod result;

pub use error::{LoadError, ModelRole, PredictionError};
pub use handles::{ClassifierHandle, ScorerHandle, load_models};
pub use prediction_service::{PredictionService, ServiceStatus};
pub use result::{PredictionResult, RiskFlag};
