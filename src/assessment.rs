//! Evaluation Result
//!
//! The single record an evaluation produces. Serializes to the JSON shape
//! callers already consume:
//! `{"prediction", "suitability_score", "threshold", "flags", "advice"}`.

use serde::Serialize;

use crate::flagger::Flags;
use crate::scorer::Verdict;

/// Outcome of evaluating one observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    /// "suitable" or "not suitable"
    pub prediction: Verdict,

    /// Probability rounded to 3 decimals
    pub suitability_score: f64,

    /// Threshold the verdict was taken at
    pub threshold: f64,

    pub flags: Flags,

    pub advice: String,
}

impl EvaluationResult {
    /// Package the parts; the verdict must already reflect the unrounded probability
    pub fn assemble(
        prediction: Verdict,
        probability: f64,
        threshold: f64,
        flags: Flags,
        advice: String,
    ) -> Self {
        Self {
            prediction,
            suitability_score: round_score(probability),
            threshold,
            flags,
            advice,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Round to 3 decimals
///
/// Rounds the exact binary value of the probability, so 0.0025 (stored just
/// above 0.0025) gives 0.003 and 0.1235 (stored just below) gives 0.123.
/// Exact halves go to even.
pub fn round_score(probability: f64) -> f64 {
    format!("{:.3}", probability).parse().unwrap_or(probability)
}
