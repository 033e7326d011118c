use crate::features::{FeatureSchema, FeatureVector};
use crate::service::PredictionResult;
use chrono::{DateTime, Local};
use serde::Serialize;

const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";

/// Two-decimal display form of a score.
pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

/// A prediction ready to be shown to the user.
#[derive(Debug, Clone)]
pub struct Report {
    pub schema: FeatureSchema,
    pub features: FeatureVector,
    pub result: PredictionResult,
    pub generated_at: DateTime<Local>,
}

/// Machine readable form of a [`Report`]; the score keeps full precision.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub panel: FeatureSchema,
    pub features: &'a FeatureVector,
    pub score: f64,
    pub risk: u8,
    pub generated_at: String,
}

impl Report {
    pub fn new(schema: FeatureSchema, features: FeatureVector, result: PredictionResult) -> Self {
        Self {
            schema,
            features,
            result,
            generated_at: Local::now(),
        }
    }

    pub fn score_line(&self) -> String {
        format!(
            "Predicted Future EASI Score: {}",
            format_score(self.result.score)
        )
    }

    pub fn risk_line(&self) -> String {
        format!("Future Flare-Up Risk: {}", self.result.risk)
    }

    pub fn render(&self, color: bool) -> String {
        if !color {
            return format!("{}\n{}", self.risk_line(), self.score_line());
        }
        let risk_color = if self.result.risk.is_flare() { RED } else { GREEN };
        format!(
            "{risk_color}{BOLD}{}{RESET}\n{BOLD}{}{RESET}\n{DIM_ITALIC}{}{RESET}",
            self.risk_line(),
            self.score_line(),
            self.generated_at.format("%Y-%m-%d %H:%M:%S"),
        )
    }

    pub fn to_json(&self) -> JsonReport<'_> {
        JsonReport {
            panel: self.schema,
            features: &self.features,
            score: self.result.score,
            risk: self.result.risk.as_label(),
            generated_at: self.generated_at.to_rfc3339(),
        }
    }
}
