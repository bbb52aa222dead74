//! Process Evaluation
//!
//! Turns a single agronomic observation (crop, growth stage, soil nutrients,
//! climate readings) into a suitability verdict plus corrective advice.
//!
//! Two independent checks are fused:
//! - `estimator/` + `scorer/`: learned probability, thresholded into a verdict
//! - `reference/` + `flagger/`: per-crop, per-stage ideal ranges, one flag per variable
//!
//! `advisor/` renders flags as advice and `assessment/` packages everything
//! into the output record. `pipeline/` wires the steps together.

pub mod error;
pub mod config;
pub mod observation;
pub mod estimator;
pub mod scorer;
pub mod reference;
pub mod flagger;
pub mod advisor;
pub mod assessment;
pub mod pipeline;

// Re-export commonly used types
pub use error::{EstimationError, EvalError, ObservationError, ReferenceLoadError};
pub use config::EvalConfig;
pub use observation::{Observation, ObservationBuilder, Variable};
pub use estimator::{LogisticPipeline, SuitabilityEstimator};
pub use scorer::{verdict, SuitabilityScorer, Verdict, DEFAULT_THRESHOLD};
pub use reference::{IdealRange, RangeLookup, RangeStore, StageRanges};
pub use flagger::{compare_to_range, flag_all, Flag, Flags};
pub use advisor::{advise, ALL_WITHIN_RANGE};
pub use assessment::{round_score, EvaluationResult};
pub use pipeline::ProcessEvaluator;
