//! Suitability Estimator
//!
//! The learned half of the evaluation. Anything that can turn an
//! observation into a probability implements [`SuitabilityEstimator`]; the
//! scorer never looks inside.
//!
//! [`LogisticPipeline`] is the persisted artifact shipped with the tool: a
//! standardise + one-hot + logistic regression model stored as JSON.
//!
//! ```json
//! { "numeric": { "N": {"mean": 80.0, "scale": 25.0, "coef": 0.6}, ... },
//!   "categorical": { "crop": {"rice": 0.4}, "stage": {"vegetative": 0.1} },
//!   "intercept": -0.2 }
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::EstimationError;
use crate::observation::{Observation, Variable};

/// Capability: score an observation as a probability in [0, 1]
pub trait SuitabilityEstimator {
    fn predict_probability(&self, observation: &Observation) -> Result<f64, EstimationError>;
}

impl<E: SuitabilityEstimator + ?Sized> SuitabilityEstimator for &E {
    fn predict_probability(&self, observation: &Observation) -> Result<f64, EstimationError> {
        (**self).predict_probability(observation)
    }
}

impl<E: SuitabilityEstimator + ?Sized> SuitabilityEstimator for Box<E> {
    fn predict_probability(&self, observation: &Observation) -> Result<f64, EstimationError> {
        (**self).predict_probability(observation)
    }
}

/// Standardisation and weight for one numeric feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericFeature {
    pub mean: f64,
    pub scale: f64,
    pub coef: f64,
}

impl NumericFeature {
    fn contribution(&self, value: f64) -> f64 {
        // Constant columns come out of the scaler with scale 0
        let scale = if self.scale == 0.0 { 1.0 } else { self.scale };
        self.coef * (value - self.mean) / scale
    }
}

/// One-hot weights for the crop and stage identifiers
///
/// Categories absent from the map encode to all zeros.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoricalFeatures {
    #[serde(default)]
    pub crop: FxHashMap<String, f64>,
    #[serde(default)]
    pub stage: FxHashMap<String, f64>,
}

/// Logistic regression over standardised numerics and one-hot identifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticPipeline {
    numeric: FxHashMap<String, NumericFeature>,
    #[serde(default)]
    categorical: CategoricalFeatures,
    intercept: f64,
}

impl LogisticPipeline {
    /// Load the artifact from a JSON file
    pub fn load(path: &Path) -> Result<Self, EstimationError> {
        let contents = fs::read_to_string(path).map_err(|source| EstimationError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let pipeline: LogisticPipeline =
            serde_json::from_str(&contents).map_err(|source| EstimationError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        pipeline.check_features()?;

        info!(
            crops = pipeline.categorical.crop.len(),
            stages = pipeline.categorical.stage.len(),
            "Loaded estimator from {:?}",
            path
        );
        Ok(pipeline)
    }

    /// Build a pipeline from parts, checking that every variable has a feature
    pub fn new(
        numeric: FxHashMap<String, NumericFeature>,
        categorical: CategoricalFeatures,
        intercept: f64,
    ) -> Result<Self, EstimationError> {
        let pipeline = Self {
            numeric,
            categorical,
            intercept,
        };
        pipeline.check_features()?;
        Ok(pipeline)
    }

    fn check_features(&self) -> Result<(), EstimationError> {
        for variable in Variable::ALL {
            if !self.numeric.contains_key(variable.wire_name()) {
                return Err(EstimationError::MissingFeature(variable.wire_name()));
            }
        }
        Ok(())
    }

    /// Linear score before the logistic link
    pub fn decision_function(&self, observation: &Observation) -> Result<f64, EstimationError> {
        let mut z = self.intercept;
        for variable in Variable::ALL {
            let feature = self
                .numeric
                .get(variable.wire_name())
                .ok_or(EstimationError::MissingFeature(variable.wire_name()))?;
            z += feature.contribution(observation.value(variable));
        }
        z += self.categorical.crop.get(observation.crop()).copied().unwrap_or(0.0);
        z += self.categorical.stage.get(observation.stage()).copied().unwrap_or(0.0);
        Ok(z)
    }
}

impl SuitabilityEstimator for LogisticPipeline {
    fn predict_probability(&self, observation: &Observation) -> Result<f64, EstimationError> {
        let z = self.decision_function(observation)?;
        if !z.is_finite() {
            return Err(EstimationError::Failed(format!(
                "non-finite decision value {} for {}/{}",
                z,
                observation.crop(),
                observation.stage()
            )));
        }
        Ok(logistic(z))
    }
}

/// Numerically stable logistic function
pub fn logistic(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
