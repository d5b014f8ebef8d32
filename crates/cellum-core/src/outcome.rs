//! Tri-state result of evaluating a rule for one cell.

use std::fmt;

/// What a rule decides for a cell.
///
/// Exact-pattern rules only ever produce [`Die`](Outcome::Die) or
/// [`Live`](Outcome::Live); aggregate-count rules may also leave the
/// cell's alive-state as it was.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    /// The cell is dead in the next generation.
    #[default]
    Die,
    /// The cell is alive in the next generation.
    Live,
    /// The cell keeps its current alive-state.
    Unchanged,
}

impl Outcome {
    /// Resolve the outcome against the cell's current alive-state.
    #[inline]
    pub fn apply(self, current: bool) -> bool {
        match self {
            Self::Die => false,
            Self::Live => true,
            Self::Unchanged => current,
        }
    }
}

impl From<bool> for Outcome {
    fn from(alive: bool) -> Self {
        if alive {
            Self::Live
        } else {
            Self::Die
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Die => write!(f, "die"),
            Self::Live => write!(f, "live"),
            Self::Unchanged => write!(f, "unchanged"),
        }
    }
}
