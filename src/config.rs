use crate::features::FeatureSchema;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "easi-flare.json";
pub const DEFAULT_SCORER_FILE: &str = "easi_prediction_model.json";
pub const DEFAULT_CLASSIFIER_FILE: &str = "flare_prediction_model.json";

/// `env_logger` filter used when `RUST_LOG` is unset. Load progress is logged
/// at `info` and stays hidden so it does not interleave with the form.
pub const DEFAULT_LOG_FILTER: &str = "warn";

fn default_scorer_path() -> PathBuf {
    PathBuf::from(DEFAULT_SCORER_FILE)
}

fn default_classifier_path() -> PathBuf {
    PathBuf::from(DEFAULT_CLASSIFIER_FILE)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Deployment settings: which marker panel is in use and where its two
/// artifacts live. Relative artifact paths resolve against the config file's
/// directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub panel: FeatureSchema,

    #[serde(default = "default_scorer_path")]
    pub scorer_path: PathBuf,

    #[serde(default = "default_classifier_path")]
    pub classifier_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            panel: FeatureSchema::default(),
            scorer_path: default_scorer_path(),
            classifier_path: default_classifier_path(),
        }
    }
}

impl Config {
    pub fn from_json(s: &str, origin: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = Self::from_json(&raw, path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        info!("Loaded config from {}", path.display());
        Ok(config.resolve_relative_to(base))
    }

    pub fn resolve_relative_to(mut self, base: &Path) -> Self {
        if self.scorer_path.is_relative() {
            self.scorer_path = base.join(&self.scorer_path);
        }
        if self.classifier_path.is_relative() {
            self.classifier_path = base.join(&self.classifier_path);
        }
        self
    }

    /// Applies command-line overrides on top of file values.
    pub fn with_overrides(
        mut self,
        panel: Option<FeatureSchema>,
        scorer_path: Option<PathBuf>,
        classifier_path: Option<PathBuf>,
    ) -> Self {
        if let Some(p) = panel {
            self.panel = p;
        }
        if let Some(p) = scorer_path {
            self.scorer_path = p;
        }
        if let Some(p) = classifier_path {
            self.classifier_path = p;
        }
        self
    }
}
