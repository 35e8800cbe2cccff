//! Per-player match outcome.

use serde::{Deserialize, Serialize};

use super::Cell;

/// Result of one player in one match. Absence from a match's results map
/// means the player did not play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Loss,
    Win,
}

impl Outcome {
    /// Decode a result cell. The sheet records 1 for a loss and 2 for a win,
    /// as a number or as numeric text; every other value means the player
    /// did not take part.
    pub fn from_cell(cell: &Cell) -> Option<Self> {
        match cell.as_number() {
            Some(n) if n == 1.0 => Some(Outcome::Loss),
            Some(n) if n == 2.0 => Some(Outcome::Win),
            _ => None,
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, Outcome::Win)
    }

    /// Points awarded for this outcome: 1 for a loss, 2 for a win.
    pub fn points(&self) -> u32 {
        match self {
            Outcome::Loss => 1,
            Outcome::Win => 2,
        }
    }

    /// Streak symbol, 'W' or 'L'.
    pub fn symbol(&self) -> char {
        match self {
            Outcome::Loss => 'L',
            Outcome::Win => 'W',
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
