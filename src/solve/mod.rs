//! Find the fewest button presses that configure a machine

use std::convert::TryFrom;

use crate::machine::Presses;

pub mod joltage;
pub mod lights;
mod matrix;

/// The outcome of configuring one machine
#[derive(Clone, Debug, PartialEq)]
pub enum SolveResult {
    /// No combination of button presses reaches the target
    Infeasible,
    /// A combination with the fewest total presses
    Solved(Solution),
}

impl SolveResult {
    /// the value summed in place of an infeasible machine
    pub const SENTINEL: i64 = -1;

    pub fn is_solved(&self) -> bool {
        matches!(self, SolveResult::Solved(_))
    }

    pub fn solved(&self) -> Option<&Solution> {
        match self {
            SolveResult::Solved(solution) => Some(solution),
            SolveResult::Infeasible => None,
        }
    }

    /// the fewest total presses, if the machine can be configured
    pub fn total(&self) -> Option<Presses> {
        self.solved().map(Solution::total)
    }

    /// the fewest total presses, or `SENTINEL` if the machine cannot be configured.
    /// Totals too large for `i64` saturate.
    pub fn total_or_sentinel(&self) -> i64 {
        self.total().map_or(Self::SENTINEL, |total| {
            i64::try_from(total).unwrap_or_else(|_| i64::max_value())
        })
    }
}

/// How many times to press each button
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    presses: Vec<Presses>,
}

impl Solution {
    pub(crate) fn new(presses: Vec<Presses>) -> Self {
        Self { presses }
    }

    /// presses per button, indexed by `ButtonId`
    pub fn presses(&self) -> &[Presses] {
        &self.presses
    }

    pub fn total(&self) -> Presses {
        self.presses.iter().sum()
    }
}
