//! Advice Generation
//!
//! Turns range flags into one comma-joined sentence of instructions.
//! Only `low` and `high` flags produce an instruction; `ok` and `unknown`
//! are silent.

use std::fmt;

use crate::flagger::{Flag, Flags};
use crate::observation::Variable;

/// Sentence used when no variable needs attention
///
/// Also emitted when every flag is `unknown`.
pub const ALL_WITHIN_RANGE: &str = "All within the recommended range.";

/// Corrective direction for one variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Increase,
    Reduce,
}

/// A single corrective instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub action: Action,
    pub variable: Variable,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.action {
            Action::Increase => "Increase",
            Action::Reduce => "Reduce",
        };
        write!(f, "{} {}", verb, self.variable)
    }
}

/// Instructions in canonical variable order
pub fn instructions(flags: &Flags) -> Vec<Instruction> {
    flags
        .iter()
        .filter_map(|(variable, flag)| match flag {
            Flag::Low => Some(Instruction { action: Action::Increase, variable }),
            Flag::High => Some(Instruction { action: Action::Reduce, variable }),
            Flag::Ok | Flag::Unknown => None,
        })
        .collect()
}

/// Render the advice sentence for a set of flags
pub fn advise(flags: &Flags) -> String {
    let tips = instructions(flags);
    if tips.is_empty() {
        return ALL_WITHIN_RANGE.to_string();
    }

    tips.iter()
        .map(Instruction::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
