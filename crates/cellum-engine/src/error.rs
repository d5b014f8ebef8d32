//! Errors raised while advancing or running a simulation.

use cellum_core::SpeciesId;
use cellum_space::SpaceError;
use std::error::Error;
use std::fmt;
use std::io;

/// Errors from a single generation advance.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// Neighbour resolution failed.
    Bounds(SpaceError),
    /// The output buffer does not have the input grid's shape.
    ShapeMismatch {
        /// Shape of the grid being read.
        expected: (usize, usize),
        /// Shape of the buffer being written.
        found: (usize, usize),
    },
    /// A cell carries no species in multi-species mode.
    MissingSpecies {
        /// Flat index of the cell.
        index: usize,
    },
    /// A cell names a species the registry does not hold.
    UnknownSpecies {
        /// The unregistered id.
        species: SpeciesId,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bounds(e) => write!(f, "neighbour resolution: {e}"),
            Self::ShapeMismatch { expected, found } => write!(
                f,
                "output buffer is {}x{}, grid is {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            Self::MissingSpecies { index } => write!(f, "cell {index} has no species"),
            Self::UnknownSpecies { species } => write!(f, "species {species} is not registered"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Bounds(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for StepError {
    fn from(e: SpaceError) -> Self {
        match e {
            SpaceError::ShapeMismatch { expected, found } => Self::ShapeMismatch { expected, found },
            other => Self::Bounds(other),
        }
    }
}

/// Errors from [`SimulationRunner::run`](crate::SimulationRunner::run).
#[derive(Debug)]
pub enum RunError {
    /// An advance failed.
    Step(StepError),
    /// The sink could not write a generation.
    Sink(io::Error),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step(e) => write!(f, "step failed: {e}"),
            Self::Sink(e) => write!(f, "sink failed: {e}"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Step(e) => Some(e),
            Self::Sink(e) => Some(e),
        }
    }
}

impl From<StepError> for RunError {
    fn from(e: StepError) -> Self {
        Self::Step(e)
    }
}

impl From<io::Error> for RunError {
    fn from(e: io::Error) -> Self {
        Self::Sink(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_is_lifted() {
        let e = StepError::from(SpaceError::ShapeMismatch {
            expected: (1, 4),
            found: (1, 5),
        });
        assert_eq!(
            e,
            StepError::ShapeMismatch {
                expected: (1, 4),
                found: (1, 5)
            }
        );
        assert!(e.source().is_none());
    }

    #[test]
    fn bounds_keeps_source() {
        let e = StepError::from(SpaceError::CoordOutOfBounds { coord: 3, size: 0 });
        assert!(matches!(e, StepError::Bounds(_)));
        assert!(e.source().is_some());
    }

    #[test]
    fn run_error_display() {
        let e = RunError::from(StepError::MissingSpecies { index: 7 });
        assert_eq!(e.to_string(), "step failed: cell 7 has no species");
    }
}
