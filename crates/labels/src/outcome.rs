//! Trade outcome classes.

use std::fmt;

/// Outcome of a hypothetical long trade opened at one time step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Take-profit barrier reached first.
    Win,
    /// Stop-loss barrier reached first.
    Loss,
    /// Neither barrier reached within the forward window.
    Nil,
    /// Forward window runs past the end of the series; never scanned.
    Unresolved,
}

impl Outcome {
    /// One-hot `(win, loss, nil)` encoding.
    ///
    /// `Unresolved` encodes as nil, which is how an unscanned step reads to a
    /// consumer that only sees the tensor.
    #[must_use]
    pub fn one_hot(self) -> [f64; 3] {
        match self {
            Outcome::Win => [1.0, 0.0, 0.0],
            Outcome::Loss => [0.0, 1.0, 0.0],
            Outcome::Nil | Outcome::Unresolved => [0.0, 0.0, 1.0],
        }
    }

    /// True for outcomes produced by an actual scan.
    #[must_use]
    pub fn is_resolved(self) -> bool {
        !matches!(self, Outcome::Unresolved)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::Nil => "nil",
            Outcome::Unresolved => "unresolved",
        };
        f.write_str(s)
    }
}

/// Class distribution of a label table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct ClassCounts {
    /// Number of `Win` outcomes.
    pub win: usize,
    /// Number of `Loss` outcomes.
    pub loss: usize,
    /// Number of `Nil` outcomes.
    pub nil: usize,
}

impl ClassCounts {
    /// Total number of counted outcomes.
    #[must_use]
    pub fn total(&self) -> usize {
        self.win + self.loss + self.nil
    }

    pub(crate) fn add(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.win += 1,
            Outcome::Loss => self.loss += 1,
            Outcome::Nil => self.nil += 1,
            Outcome::Unresolved => {}
        }
    }
}
