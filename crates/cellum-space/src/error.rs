//! Error types for space operations.

use std::fmt;

/// Errors arising from grid construction, seed decoding or neighbour
/// resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceError {
    /// Attempted to construct a grid with zero cells.
    EmptySpace,
    /// A coordinate could not be mapped into `[0, size)`.
    CoordOutOfBounds {
        /// The offending coordinate.
        coord: i64,
        /// Size of the axis it was resolved against.
        size: usize,
    },
    /// A dimension exceeds what coordinate arithmetic can address.
    DimensionTooLarge {
        /// Which dimension.
        name: &'static str,
        /// The requested value.
        value: usize,
        /// The largest accepted value.
        max: usize,
    },
    /// A neighbourhood with no offsets.
    EmptyNeighbourhood,
    /// Two grids that must share a shape do not.
    ShapeMismatch {
        /// Expected `(rows, cols)`.
        expected: (usize, usize),
        /// Actual `(rows, cols)`.
        found: (usize, usize),
    },
    /// Rows of a 2D seed have different lengths.
    RaggedRows {
        /// Index of the first row whose length differs.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A seed glyph that maps to no known cell kind.
    UnknownGlyph {
        /// The glyph.
        glyph: char,
        /// Character position within the seed.
        position: usize,
    },
    /// A random-fill density outside `[0, 1]`.
    InvalidDensity {
        /// The rejected value.
        value: f64,
    },
    /// A boundary policy name that is neither `wrap` nor `clip`.
    UnknownBoundary {
        /// The rejected name.
        name: String,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpace => write!(f, "space must have at least one cell"),
            Self::CoordOutOfBounds { coord, size } => {
                write!(f, "coordinate {coord} cannot be resolved into [0, {size})")
            }
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds maximum {max}")
            }
            Self::EmptyNeighbourhood => write!(f, "neighbourhood has no offsets"),
            Self::ShapeMismatch { expected, found } => write!(
                f,
                "shape mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            Self::RaggedRows {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {row} has {found} cells, expected {expected} like the first row"
            ),
            Self::UnknownGlyph { glyph, position } => {
                write!(f, "unknown glyph {glyph:?} at position {position}")
            }
            Self::InvalidDensity { value } => {
                write!(f, "density must be within [0, 1], got {value}")
            }
            Self::UnknownBoundary { name } => {
                write!(f, "unknown boundary policy {name:?} (expected wrap or clip)")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
