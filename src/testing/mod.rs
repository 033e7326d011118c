pub mod fixtures;
pub mod sampling;
pub mod stubs;

pub use fixtures::{ArtifactDir, linear_scorer, logistic_classifier, write_artifact};
pub use sampling::random_valid_vector;
pub use stubs::{Answer, AskedField, ConstantModel, ScriptedDriver};
