//! Ordered neighbour offsets.

use crate::error::SpaceError;

/// An ordered list of relative offsets sampled around each cell.
///
/// Offsets are `i32` for 1D grids and `(dy, dx)` pairs for 2D grids.
/// Order is significant for exact-pattern rules, whose lookup key is the
/// ordered tuple of neighbour states, and irrelevant for aggregate-count
/// rules. A neighbourhood is immutable once built and shared read-only by
/// every cell it governs.
///
/// # Examples
///
/// ```
/// use cellum_space::Neighbourhood1D;
///
/// let n = Neighbourhood1D::radius(2, true).unwrap();
/// assert_eq!(n.offsets(), &[-2, -1, 0, 1, 2]);
///
/// let n = Neighbourhood1D::radius(1, false).unwrap();
/// assert_eq!(n.offsets(), &[-1, 1]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Neighbourhood<O> {
    offsets: Vec<O>,
}

/// Neighbourhood of a 1D grid.
pub type Neighbourhood1D = Neighbourhood<i32>;

/// Neighbourhood of a 2D grid, offsets are `(dy, dx)`.
pub type Neighbourhood2D = Neighbourhood<(i32, i32)>;

impl<O: Copy> Neighbourhood<O> {
    /// Build a neighbourhood from explicit offsets, keeping their order.
    ///
    /// Returns `Err(SpaceError::EmptyNeighbourhood)` for an empty list.
    pub fn new(offsets: impl IntoIterator<Item = O>) -> Result<Self, SpaceError> {
        let offsets: Vec<O> = offsets.into_iter().collect();
        if offsets.is_empty() {
            return Err(SpaceError::EmptyNeighbourhood);
        }
        Ok(Self { offsets })
    }

    /// The offsets in sampling order.
    pub fn offsets(&self) -> &[O] {
        &self.offsets
    }

    /// Number of sampled neighbours.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Always returns `false`: construction rejects empty neighbourhoods.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Neighbourhood1D {
    /// Largest accepted radius.
    pub const MAX_RADIUS: u32 = 1 << 16;

    /// Offsets `[-r, r]`, with `0` only when `include_middle` is set.
    pub fn radius(r: u32, include_middle: bool) -> Result<Self, SpaceError> {
        if r > Self::MAX_RADIUS {
            return Err(SpaceError::DimensionTooLarge {
                name: "radius",
                value: r as usize,
                max: Self::MAX_RADIUS as usize,
            });
        }
        let r = r as i32;
        Self::new((-r..=r).filter(|&o| include_middle || o != 0))
    }

    /// Contiguous window of `width` cells centred on the cell:
    /// `[-(width / 2), width / 2]`.
    ///
    /// Wolfram-style rules use odd widths; an even width still yields the
    /// symmetric window of `width + 1` cells.
    pub fn elementary(width: u32) -> Result<Self, SpaceError> {
        Self::radius(width / 2, true)
    }

    /// The two cells at distance `d` on either side: `[-d, d]`.
    ///
    /// `d == 0` would name only the cell itself and is rejected as an
    /// empty neighbourhood.
    pub fn pair(d: u32) -> Result<Self, SpaceError> {
        if d == 0 {
            return Err(SpaceError::EmptyNeighbourhood);
        }
        if d > Self::MAX_RADIUS {
            return Err(SpaceError::DimensionTooLarge {
                name: "distance",
                value: d as usize,
                max: Self::MAX_RADIUS as usize,
            });
        }
        let d = d as i32;
        Self::new([-d, d])
    }
}

impl Neighbourhood2D {
    /// The 8 surrounding cells, row by row, centre excluded.
    ///
    /// ```text
    /// X X X
    /// X . X
    /// X X X
    /// ```
    pub fn moore() -> Self {
        Self {
            offsets: vec![
                (-1, -1),
                (-1, 0),
                (-1, 1),
                (0, -1),
                (0, 1),
                (1, -1),
                (1, 0),
                (1, 1),
            ],
        }
    }

    /// The full 3x3 block including the centre, column by column.
    ///
    /// Used by exact-pattern 2D rules; the centre is at position 4.
    pub fn moore_with_centre() -> Self {
        let offsets = (-1..=1)
            .flat_map(|dx| (-1..=1).map(move |dy| (dy, dx)))
            .collect();
        Self { offsets }
    }

    /// Axial arms of length `range` in the four directions, centre excluded.
    ///
    /// `von_neumann(1)` is the classic 4-cell neighbourhood; `von_neumann(2)`
    /// is the 8-cell cross.
    pub fn von_neumann(range: u32) -> Result<Self, SpaceError> {
        if range > Neighbourhood1D::MAX_RADIUS {
            return Err(SpaceError::DimensionTooLarge {
                name: "range",
                value: range as usize,
                max: Neighbourhood1D::MAX_RADIUS as usize,
            });
        }
        let r = range as i32;
        let vertical = (-r..=r).filter(|&d| d != 0).map(|d| (d, 0));
        let horizontal = (-r..=r).filter(|&d| d != 0).map(|d| (0, d));
        Self::new(vertical.chain(horizontal))
    }
}
