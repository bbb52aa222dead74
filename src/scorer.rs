//! Suitability Scorer - probability and thresholded verdict
//!
//! Wraps an estimator, checks that what it returns is a probability, and
//! turns that probability into a binary verdict with an inclusive threshold.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EstimationError;
use crate::estimator::SuitabilityEstimator;
use crate::observation::Observation;

/// Default decision threshold
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Binary suitability verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "suitable")]
    Suitable,
    #[serde(rename = "not suitable")]
    NotSuitable,
}

impl Verdict {
    pub fn display_text(&self) -> &'static str {
        match self {
            Verdict::Suitable => "suitable",
            Verdict::NotSuitable => "not suitable",
        }
    }
}

/// Threshold a probability; a tie resolves to suitable
pub fn verdict(probability: f64, threshold: f64) -> Verdict {
    if probability >= threshold {
        Verdict::Suitable
    } else {
        Verdict::NotSuitable
    }
}

/// Scores observations with an external estimator
pub struct SuitabilityScorer<E> {
    estimator: E,
}

impl<E: SuitabilityEstimator> SuitabilityScorer<E> {
    pub fn new(estimator: E) -> Self {
        Self { estimator }
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// Probability that the crop/stage is viable under these conditions
    ///
    /// Calls the estimator exactly once. Anything outside [0, 1] (or NaN) is
    /// an estimator fault.
    pub fn score(&self, observation: &Observation) -> Result<f64, EstimationError> {
        let probability = self.estimator.predict_probability(observation)?;
        if !(0.0..=1.0).contains(&probability) {
            return Err(EstimationError::OutOfRange(probability));
        }
        debug!(
            crop = %observation.crop(),
            stage = %observation.stage(),
            probability,
            "Scored observation"
        );
        Ok(probability)
    }

    pub fn verdict(&self, probability: f64, threshold: f64) -> Verdict {
        verdict(probability, threshold)
    }
}
