//! Reference Ranges - per-crop, per-stage ideal intervals
//!
//! Loads the stage guide JSON once and indexes it by crop and stage for
//! O(1) lookups. An unknown (crop, stage) pair is a normal outcome and is
//! reported as `None`, never as an error.
//!
//! Expected document shape:
//! ```json
//! { "crops": { "rice": { "stages": [
//!     { "stage": "vegetative",
//!       "ideal_ranges": { "N": {"min": 60, "max": 100}, "P": {...}, ... } } ] } } }
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::ReferenceLoadError;
use crate::observation::Variable;

/// Inclusive ideal interval for one variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdealRange {
    pub min: f64,
    pub max: f64,
}

impl IdealRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Ideal intervals for all seven variables at one growth stage
///
/// Every variable is required; a stage entry missing one is a malformed store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRanges {
    #[serde(rename = "N")]
    pub n: IdealRange,
    #[serde(rename = "P")]
    pub p: IdealRange,
    #[serde(rename = "K")]
    pub k: IdealRange,
    pub temperature: IdealRange,
    pub humidity: IdealRange,
    pub ph: IdealRange,
    pub rainfall: IdealRange,
}

impl StageRanges {
    pub fn get(&self, variable: Variable) -> &IdealRange {
        match variable {
            Variable::N => &self.n,
            Variable::P => &self.p,
            Variable::K => &self.k,
            Variable::Temperature => &self.temperature,
            Variable::Humidity => &self.humidity,
            Variable::Ph => &self.ph,
            Variable::Rainfall => &self.rainfall,
        }
    }
}

/// Capability: look up the ideal ranges for a crop at a stage
pub trait RangeLookup {
    fn lookup(&self, crop: &str, stage: &str) -> Option<&StageRanges>;

    /// Stages the store knows for a crop, for diagnostics on a miss
    fn known_stages(&self, _crop: &str) -> Vec<&str> {
        Vec::new()
    }
}

// Raw document layout, only used while loading
#[derive(Debug, Deserialize)]
struct StageGuide {
    crops: FxHashMap<String, CropGuide>,
}

#[derive(Debug, Deserialize)]
struct CropGuide {
    #[serde(default)]
    stages: Vec<StageEntry>,
}

#[derive(Debug, Deserialize)]
struct StageEntry {
    stage: String,
    ideal_ranges: StageRanges,
}

/// In-memory stage guide indexed by crop, then stage
#[derive(Debug, Clone, Default)]
pub struct RangeStore {
    crops: FxHashMap<String, FxHashMap<String, StageRanges>>,
}

impl RangeStore {
    /// Load the stage guide from a JSON file
    pub fn load(path: &Path) -> Result<Self, ReferenceLoadError> {
        let contents = fs::read_to_string(path).map_err(|source| ReferenceLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let guide: StageGuide =
            serde_json::from_str(&contents).map_err(|source| ReferenceLoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let store = Self::from_guide(guide);
        info!(
            crops = store.crops.len(),
            stages = store.stage_count(),
            "Loaded reference ranges from {:?}",
            path
        );
        Ok(store)
    }

    /// Parse a stage guide held in memory
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let guide: StageGuide = serde_json::from_str(json)?;
        Ok(Self::from_guide(guide))
    }

    fn from_guide(guide: StageGuide) -> Self {
        let mut crops = FxHashMap::default();
        for (crop, crop_guide) in guide.crops {
            let mut stages = FxHashMap::default();
            for entry in crop_guide.stages {
                // First listing of a stage wins
                stages.entry(entry.stage).or_insert(entry.ideal_ranges);
            }
            crops.insert(crop, stages);
        }
        Self { crops }
    }

    /// Add or replace one (crop, stage) entry
    pub fn insert(&mut self, crop: impl Into<String>, stage: impl Into<String>, ranges: StageRanges) {
        self.crops
            .entry(crop.into())
            .or_default()
            .insert(stage.into(), ranges);
    }

    pub fn stage_count(&self) -> usize {
        self.crops.values().map(|stages| stages.len()).sum()
    }
}

impl RangeLookup for RangeStore {
    fn lookup(&self, crop: &str, stage: &str) -> Option<&StageRanges> {
        self.crops.get(crop)?.get(stage)
    }

    /// Sorted; empty if the crop is unknown
    fn known_stages(&self, crop: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .crops
            .get(crop)
            .map(|stages| stages.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }
}
