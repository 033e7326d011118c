mod artifact;
mod linear;
mod model;
mod tree;

pub use artifact::{
    ArtifactError, ArtifactKind, DecisionTreeParams, LinearRegressionParams,
    LogisticRegressionParams, ModelArtifact, RandomForestParams, TreeNode, build_model,
};
pub use linear::{LinearRegression, LogisticRegression};
pub use model::{Model, Task};
pub use tree::{DecisionTree, RandomForest};
