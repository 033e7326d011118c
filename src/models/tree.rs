use crate::models::artifact::{ArtifactError, DecisionTreeParams, RandomForestParams, TreeNode};
use crate::models::model::{Model, Task};

/// Binary decision tree stored as a flat node array with the root at index 0.
///
/// Children always sit at a higher index than their parent, so traversal
/// terminates without a visited set.
pub struct DecisionTree {
    n_features: usize,
    task: Task,
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(n_features: usize, task: Task, nodes: Vec<TreeNode>) -> Result<Self, ArtifactError> {
        if n_features == 0 {
            return Err(ArtifactError::InvalidParameter(
                "n_features must be > 0".into(),
            ));
        }
        if nodes.is_empty() {
            return Err(ArtifactError::InvalidParameter(
                "tree has no nodes".into(),
            ));
        }

        for (i, node) in nodes.iter().enumerate() {
            match node.feature {
                Some(feature) => {
                    if feature >= n_features {
                        return Err(ArtifactError::InvalidParameter(format!(
                            "node {i} splits on feature {feature} but the tree has {n_features} features"
                        )));
                    }
                    if !node.threshold.is_finite() {
                        return Err(ArtifactError::InvalidParameter(format!(
                            "node {i} has a non-finite threshold"
                        )));
                    }
                    for child in [node.left, node.right] {
                        match child {
                            Some(c) if c > i && c < nodes.len() => {}
                            Some(c) => {
                                return Err(ArtifactError::InvalidParameter(format!(
                                    "node {i} points to invalid child {c}"
                                )));
                            }
                            None => {
                                return Err(ArtifactError::InvalidParameter(format!(
                                    "split node {i} is missing a child"
                                )));
                            }
                        }
                    }
                }
                None => check_leaf_value(task, i, node.value)?,
            }
        }

        Ok(Self {
            n_features,
            task,
            nodes,
        })
    }

    fn leaf_value(&self, features: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            let node = &self.nodes[idx];
            let (Some(feature), Some(left), Some(right)) = (node.feature, node.left, node.right)
            else {
                return node.value;
            };
            // NaN and missing values fall to the right branch.
            let x = features.get(feature).copied().unwrap_or(f64::NAN);
            idx = if x <= node.threshold { left } else { right };
        }
    }
}

fn check_leaf_value(task: Task, index: usize, value: f64) -> Result<(), ArtifactError> {
    match task {
        Task::Regression if value.is_finite() => Ok(()),
        Task::Classification if value == 0.0 || value == 1.0 => Ok(()),
        Task::Regression => Err(ArtifactError::InvalidParameter(format!(
            "leaf {index} has a non-finite value"
        ))),
        Task::Classification => Err(ArtifactError::InvalidParameter(format!(
            "leaf {index} has label {value}; only 0 and 1 are allowed"
        ))),
    }
}

impl TryFrom<DecisionTreeParams> for DecisionTree {
    type Error = ArtifactError;

    fn try_from(p: DecisionTreeParams) -> Result<Self, Self::Error> {
        DecisionTree::new(p.n_features, p.task, p.nodes)
    }
}

impl Model for DecisionTree {
    fn input_width(&self) -> usize {
        self.n_features
    }

    fn task(&self) -> Task {
        self.task
    }

    fn predict(&self, features: &[f64]) -> f64 {
        self.leaf_value(features)
    }
}

/// Bagged ensemble of [`DecisionTree`]s: mean for regression, majority vote
/// (ties to 0) for classification.
pub struct RandomForest {
    n_features: usize,
    task: Task,
    trees: Vec<DecisionTree>,
}

impl TryFrom<RandomForestParams> for RandomForest {
    type Error = ArtifactError;

    fn try_from(p: RandomForestParams) -> Result<Self, Self::Error> {
        if p.trees.is_empty() {
            return Err(ArtifactError::InvalidParameter(
                "forest has no trees".into(),
            ));
        }
        let trees = p
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, nodes)| {
                DecisionTree::new(p.n_features, p.task, nodes).map_err(|e| match e {
                    ArtifactError::InvalidParameter(msg) => {
                        ArtifactError::InvalidParameter(format!("tree {i}: {msg}"))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            n_features: p.n_features,
            task: p.task,
            trees,
        })
    }
}

impl Model for RandomForest {
    fn input_width(&self) -> usize {
        self.n_features
    }

    fn task(&self) -> Task {
        self.task
    }

    fn predict(&self, features: &[f64]) -> f64 {
        let n = self.trees.len() as f64;
        match self.task {
            Task::Regression => {
                self.trees.iter().map(|t| t.predict(features)).sum::<f64>() / n
            }
            Task::Classification => {
                let positive = self
                    .trees
                    .iter()
                    .filter(|t| t.predict(features) == 1.0)
                    .count() as f64;
                if positive * 2.0 > n { 1.0 } else { 0.0 }
            }
        }
    }
}
