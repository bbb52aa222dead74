//! Evaluation configuration
//!
//! Passed into the pipeline at construction time. Nothing in the library
//! reads process-wide state.

use std::path::{Path, PathBuf};

use crate::scorer::DEFAULT_THRESHOLD;

/// Conventional stage guide filename
pub const DEFAULT_RULES_PATH: &str = "all_crops_stage_guide.json";

/// Conventional estimator artifact filename
pub const DEFAULT_MODEL_PATH: &str = "process_eval_pipeline.json";

#[derive(Debug, Clone, PartialEq)]
pub struct EvalConfig {
    /// Probability at or above which the verdict is "suitable"
    ///
    /// Conventionally in (0, 1) but not checked.
    pub threshold: f64,

    /// Stage guide JSON
    pub rules_path: PathBuf,

    /// Estimator artifact JSON
    pub model_path: PathBuf,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            rules_path: PathBuf::from(DEFAULT_RULES_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

impl EvalConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_rules_path(mut self, path: impl AsRef<Path>) -> Self {
        self.rules_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_model_path(mut self, path: impl AsRef<Path>) -> Self {
        self.model_path = path.as_ref().to_path_buf();
        self
    }
}
