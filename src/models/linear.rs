use crate::models::artifact::{ArtifactError, LinearRegressionParams, LogisticRegressionParams};
use crate::models::model::{Model, Task};
use crate::utils::math::{dot, sigmoid};

pub struct LinearRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl TryFrom<LinearRegressionParams> for LinearRegression {
    type Error = ArtifactError;

    fn try_from(p: LinearRegressionParams) -> Result<Self, Self::Error> {
        check_weights(&p.coefficients, p.intercept)?;
        Ok(Self {
            coefficients: p.coefficients,
            intercept: p.intercept,
        })
    }
}

impl Model for LinearRegression {
    fn input_width(&self) -> usize {
        self.coefficients.len()
    }

    fn task(&self) -> Task {
        Task::Regression
    }

    fn predict(&self, features: &[f64]) -> f64 {
        dot(&self.coefficients, features) + self.intercept
    }
}

pub struct LogisticRegression {
    coefficients: Vec<f64>,
    intercept: f64,
    threshold: f64,
}

impl TryFrom<LogisticRegressionParams> for LogisticRegression {
    type Error = ArtifactError;

    fn try_from(p: LogisticRegressionParams) -> Result<Self, Self::Error> {
        check_weights(&p.coefficients, p.intercept)?;
        if !(p.threshold > 0.0 && p.threshold < 1.0) {
            return Err(ArtifactError::InvalidParameter(format!(
                "threshold must lie strictly between 0 and 1, got {}",
                p.threshold
            )));
        }
        Ok(Self {
            coefficients: p.coefficients,
            intercept: p.intercept,
            threshold: p.threshold,
        })
    }
}

impl LogisticRegression {
    pub fn probability(&self, features: &[f64]) -> f64 {
        sigmoid(dot(&self.coefficients, features) + self.intercept)
    }
}

impl Model for LogisticRegression {
    fn input_width(&self) -> usize {
        self.coefficients.len()
    }

    fn task(&self) -> Task {
        Task::Classification
    }

    fn predict(&self, features: &[f64]) -> f64 {
        if self.probability(features) >= self.threshold {
            1.0
        } else {
            0.0
        }
    }
}

fn check_weights(coefficients: &[f64], intercept: f64) -> Result<(), ArtifactError> {
    if coefficients.is_empty() {
        return Err(ArtifactError::InvalidParameter(
            "coefficients must not be empty".into(),
        ));
    }
    if let Some(i) = coefficients.iter().position(|c| !c.is_finite()) {
        return Err(ArtifactError::InvalidParameter(format!(
            "coefficient #{i} is not finite"
        )));
    }
    if !intercept.is_finite() {
        return Err(ArtifactError::InvalidParameter(
            "intercept is not finite".into(),
        ));
    }
    Ok(())
}
