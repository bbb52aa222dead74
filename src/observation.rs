//! Observation Builder
//!
//! One agronomic reading: crop and growth stage identifiers plus the seven
//! monitored soil and climate variables. Built once per evaluation and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ObservationError;

/// A monitored variable
///
/// The declaration order is the canonical order used for flags and advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    N,
    P,
    K,
    Temperature,
    Humidity,
    Ph,
    Rainfall,
}

impl Variable {
    /// All seven variables in canonical order
    pub const ALL: [Variable; 7] = [
        Variable::N,
        Variable::P,
        Variable::K,
        Variable::Temperature,
        Variable::Humidity,
        Variable::Ph,
        Variable::Rainfall,
    ];

    /// Key used in the reference store, the estimator artifact, and output flags
    pub fn wire_name(&self) -> &'static str {
        match self {
            Variable::N => "N",
            Variable::P => "P",
            Variable::K => "K",
            Variable::Temperature => "temperature",
            Variable::Humidity => "humidity",
            Variable::Ph => "ph",
            Variable::Rainfall => "rainfall",
        }
    }

    /// Human-facing label
    pub fn display_text(&self) -> &'static str {
        match self {
            Variable::N => "Nitrogen (N)",
            Variable::P => "Phosphorus (P)",
            Variable::K => "Potassium (K)",
            Variable::Temperature => "Temperature",
            Variable::Humidity => "Humidity",
            Variable::Ph => "pH",
            Variable::Rainfall => "Rainfall",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A single crop/stage reading
///
/// Fields are private so every instance has passed `ObservationBuilder::build`;
/// deserializing runs the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ObservationRecord", into = "ObservationRecord")]
pub struct Observation {
    crop: String,
    stage: String,
    /// Canonical variable order
    values: [f64; 7],
}

impl Observation {
    pub fn builder(crop: impl Into<String>, stage: impl Into<String>) -> ObservationBuilder {
        ObservationBuilder::new(crop, stage)
    }

    pub fn crop(&self) -> &str {
        &self.crop
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Read one monitored variable
    pub fn value(&self, variable: Variable) -> f64 {
        self.values[variable as usize]
    }
}

/// Wire layout of an observation
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ObservationRecord {
    crop: String,
    stage: String,

    /// Soil nitrogen
    #[serde(rename = "N")]
    n: f64,

    /// Soil phosphorus
    #[serde(rename = "P")]
    p: f64,

    /// Soil potassium
    #[serde(rename = "K")]
    k: f64,

    /// Air temperature (°C)
    temperature: f64,

    /// Relative humidity (%)
    humidity: f64,

    /// Soil pH
    ph: f64,

    /// Rainfall (mm)
    rainfall: f64,
}

impl TryFrom<ObservationRecord> for Observation {
    type Error = ObservationError;

    fn try_from(r: ObservationRecord) -> Result<Self, Self::Error> {
        ObservationBuilder::new(r.crop, r.stage)
            .values([r.n, r.p, r.k, r.temperature, r.humidity, r.ph, r.rainfall])
            .build()
    }
}

impl From<Observation> for ObservationRecord {
    fn from(o: Observation) -> Self {
        let [n, p, k, temperature, humidity, ph, rainfall] = o.values;
        Self {
            crop: o.crop,
            stage: o.stage,
            n,
            p,
            k,
            temperature,
            humidity,
            ph,
            rainfall,
        }
    }
}

/// Collects the identifiers and seven readings, then validates them together
#[derive(Debug, Clone, Default)]
pub struct ObservationBuilder {
    crop: String,
    stage: String,
    values: [Option<f64>; 7],
}

impl ObservationBuilder {
    pub fn new(crop: impl Into<String>, stage: impl Into<String>) -> Self {
        Self {
            crop: crop.into(),
            stage: stage.into(),
            values: [None; 7],
        }
    }

    /// Set a variable by enum
    pub fn set(mut self, variable: Variable, value: f64) -> Self {
        self.values[variable as usize] = Some(value);
        self
    }

    /// Set all seven variables in canonical order
    pub fn values(mut self, values: [f64; 7]) -> Self {
        self.values = values.map(Some);
        self
    }

    pub fn build(self) -> Result<Observation, ObservationError> {
        let crop = self.crop.trim().to_string();
        let stage = self.stage.trim().to_string();
        if crop.is_empty() {
            return Err(ObservationError::Missing("crop"));
        }
        if stage.is_empty() {
            return Err(ObservationError::Missing("stage"));
        }

        let mut resolved = [0.0; 7];
        for variable in Variable::ALL {
            let field = variable.wire_name();
            let value = self.values[variable as usize].ok_or(ObservationError::Missing(field))?;
            if !value.is_finite() {
                return Err(ObservationError::NotFinite { field, value });
            }
            resolved[variable as usize] = value;
        }

        Ok(Observation {
            crop,
            stage,
            values: resolved,
        })
    }
}
