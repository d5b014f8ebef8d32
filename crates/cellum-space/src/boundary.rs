//! Boundary policies for neighbour resolution.

use crate::error::SpaceError;
use std::fmt;
use std::str::FromStr;

/// How a coordinate outside `[0, size)` is mapped back into the grid.
///
/// # Examples
///
/// ```
/// use cellum_space::BoundaryPolicy;
///
/// assert_eq!(BoundaryPolicy::Wrap.resolve(-1, 5).unwrap(), 4);
/// assert_eq!(BoundaryPolicy::Wrap.resolve(7, 5).unwrap(), 2);
/// assert_eq!(BoundaryPolicy::Clip.resolve(-3, 5).unwrap(), 0);
/// assert_eq!(BoundaryPolicy::Clip.resolve(9, 5).unwrap(), 4);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundaryPolicy {
    /// Out-of-range coordinates wrap to the opposite side (toroidal).
    #[default]
    Wrap,
    /// Out-of-range coordinates clamp to the nearest edge cell.
    ///
    /// Negative coordinates clamp to `0`, coordinates at or past the end
    /// clamp to `size - 1`.
    Clip,
}

impl BoundaryPolicy {
    /// Map `coordinate` into `[0, size)`.
    ///
    /// Fails only when there is no valid index to return: `size == 0`,
    /// or a size too large for signed coordinate arithmetic.
    #[inline]
    pub fn resolve(self, coordinate: i64, size: usize) -> Result<usize, SpaceError> {
        let n = match i64::try_from(size) {
            Ok(n) if n > 0 => n,
            _ => {
                return Err(SpaceError::CoordOutOfBounds {
                    coord: coordinate,
                    size,
                })
            }
        };
        if (0..n).contains(&coordinate) {
            return Ok(coordinate as usize);
        }
        let resolved = match self {
            Self::Wrap => coordinate.rem_euclid(n),
            Self::Clip => coordinate.clamp(0, n - 1),
        };
        Ok(resolved as usize)
    }
}

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wrap => write!(f, "wrap"),
            Self::Clip => write!(f, "clip"),
        }
    }
}

impl FromStr for BoundaryPolicy {
    type Err = SpaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wrap" => Ok(Self::Wrap),
            "clip" => Ok(Self::Clip),
            _ => Err(SpaceError::UnknownBoundary {
                name: s.to_string(),
            }),
        }
    }
}
