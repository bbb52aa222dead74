//! Process Evaluator - fuses the learned score with the rule check
//!
//! Flow for one observation:
//! 1. Score with the estimator and threshold into a verdict
//! 2. Look up the stage's ideal ranges and flag every variable
//! 3. Turn flags into advice
//! 4. Assemble the result record
//!
//! Steps 1 and 2 are independent. Either the whole record is produced or
//! the evaluation fails; nothing partial is returned.

use tracing::{debug, warn};

use crate::advisor::advise;
use crate::assessment::EvaluationResult;
use crate::config::EvalConfig;
use crate::error::{EstimationError, EvalError};
use crate::estimator::{LogisticPipeline, SuitabilityEstimator};
use crate::flagger::flag_all;
use crate::observation::Observation;
use crate::reference::{RangeLookup, RangeStore};
use crate::scorer::SuitabilityScorer;

/// Evaluates observations against one estimator and one stage guide
pub struct ProcessEvaluator<E, R> {
    scorer: SuitabilityScorer<E>,
    ranges: R,
    threshold: f64,
}

impl ProcessEvaluator<LogisticPipeline, RangeStore> {
    /// Load both artifacts named in the configuration
    pub fn from_config(config: &EvalConfig) -> Result<Self, EvalError> {
        let estimator = LogisticPipeline::load(&config.model_path)?;
        let ranges = RangeStore::load(&config.rules_path)?;
        Ok(Self::new(estimator, ranges, config))
    }
}

impl<E: SuitabilityEstimator, R: RangeLookup> ProcessEvaluator<E, R> {
    pub fn new(estimator: E, ranges: R, config: &EvalConfig) -> Self {
        Self {
            scorer: SuitabilityScorer::new(estimator),
            ranges,
            threshold: config.threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn ranges(&self) -> &R {
        &self.ranges
    }

    /// Evaluate one observation
    pub fn evaluate(&self, observation: &Observation) -> Result<EvaluationResult, EstimationError> {
        let probability = self.scorer.score(observation)?;
        let verdict = self.scorer.verdict(probability, self.threshold);

        let stage_ranges = self.ranges.lookup(observation.crop(), observation.stage());
        if stage_ranges.is_none() {
            warn!(
                crop = %observation.crop(),
                stage = %observation.stage(),
                known_stages = ?self.ranges.known_stages(observation.crop()),
                "No reference ranges for crop/stage, flags will be unknown"
            );
        }
        let flags = flag_all(observation, stage_ranges);
        let advice = advise(&flags);

        debug!(
            verdict = verdict.display_text(),
            probability,
            threshold = self.threshold,
            %advice,
            "Evaluated observation"
        );

        Ok(EvaluationResult::assemble(
            verdict,
            probability,
            self.threshold,
            flags,
            advice,
        ))
    }
}
