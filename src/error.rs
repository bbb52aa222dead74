//! Error types
//!
//! Each external collaborator gets its own error so callers can tell an
//! estimator failure from a broken reference store. `EvalError` covers
//! loading both artifacts; `ObservationError` comes straight from the builder.

use std::path::PathBuf;

/// Failure to load or run the suitability estimator
#[derive(Debug, thiserror::Error)]
pub enum EstimationError {
    #[error("Failed to read estimator artifact {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse estimator artifact {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Estimator artifact is missing numeric feature '{0}'")]
    MissingFeature(&'static str),

    #[error("Estimator returned {0}, expected a probability in [0, 1]")]
    OutOfRange(f64),

    #[error("Estimator failed: {0}")]
    Failed(String),
}

/// Failure to load the reference-range store
#[derive(Debug, thiserror::Error)]
pub enum ReferenceLoadError {
    #[error("Failed to read reference ranges {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse reference ranges {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Rejected caller input
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ObservationError {
    #[error("Missing field '{0}'. Require: crop, stage, N, P, K, temperature, humidity, ph, rainfall")]
    Missing(&'static str),

    #[error("Field '{field}' must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
}

/// Failure to set up an evaluator from its artifacts
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error(transparent)]
    Estimation(#[from] EstimationError),

    #[error(transparent)]
    ReferenceLoad(#[from] ReferenceLoadError),
}
