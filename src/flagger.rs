//! Range Flagger
//!
//! Classifies each monitored variable against its ideal interval for the
//! observation's crop and stage. Intervals are inclusive at both ends.
//! When the stage guide has no entry for the pair, every variable is
//! `Unknown`; that is the expected fallback, not an error.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

use crate::observation::{Observation, Variable};
use crate::reference::{IdealRange, StageRanges};

/// Result of comparing one value to its ideal interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    /// min <= value <= max
    Ok,
    /// value < min
    Low,
    /// value > max
    High,
    /// No reference for this crop/stage
    Unknown,
}

impl Flag {
    pub fn display_text(&self) -> &'static str {
        match self {
            Flag::Ok => "ok",
            Flag::Low => "low",
            Flag::High => "high",
            Flag::Unknown => "unknown",
        }
    }
}

/// Compare a value against an inclusive interval
pub fn compare_to_range(value: f64, range: &IdealRange) -> Flag {
    if value < range.min {
        Flag::Low
    } else if value > range.max {
        Flag::High
    } else {
        Flag::Ok
    }
}

/// One flag per monitored variable, in canonical variable order
///
/// Serializes as a JSON object keyed by wire name, preserving that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags([Flag; 7]);

impl Flags {
    pub fn all(flag: Flag) -> Self {
        Self([flag; 7])
    }

    pub fn get(&self, variable: Variable) -> Flag {
        self.0[variable as usize]
    }

    /// (variable, flag) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Variable, Flag)> + '_ {
        Variable::ALL.into_iter().map(move |v| (v, self.0[v as usize]))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn count(&self, flag: Flag) -> usize {
        self.0.iter().filter(|&&f| f == flag).count()
    }
}

impl Serialize for Flags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (variable, flag) in self.iter() {
            map.serialize_entry(variable.wire_name(), &flag)?;
        }
        map.end()
    }
}

/// Flag all seven variables of an observation
pub fn flag_all(observation: &Observation, ranges: Option<&StageRanges>) -> Flags {
    match ranges {
        None => Flags::all(Flag::Unknown),
        Some(ranges) => Flags(Variable::ALL.map(|v| compare_to_range(observation.value(v), ranges.get(v)))),
    }
}
