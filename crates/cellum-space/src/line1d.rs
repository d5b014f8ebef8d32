//! 1D line of cells.

use crate::boundary::BoundaryPolicy;
use crate::error::SpaceError;
use crate::lattice::Lattice;
use cellum_core::Cell;
use rand::Rng;
use std::fmt;

/// A one-dimensional grid of cells.
///
/// Each cell has index `i` where `0 <= i < len`. Neighbours outside the
/// line are mapped back in by the [`BoundaryPolicy`] passed to
/// [`Lattice::neighbour_index`].
///
/// # Examples
///
/// ```
/// use cellum_space::{BoundaryPolicy, Grid1D, Lattice};
///
/// let line = Grid1D::point(5).unwrap();
/// assert_eq!(line.len(), 5);
/// assert_eq!(line.alive_count(), 1);
/// assert!(line.get(2).unwrap().alive);
///
/// // Left neighbour of cell 0 wraps to the last cell.
/// assert_eq!(line.neighbour_index(0, -1, BoundaryPolicy::Wrap).unwrap(), 4);
/// assert_eq!(line.neighbour_index(0, -1, BoundaryPolicy::Clip).unwrap(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid1D {
    cells: Vec<Cell>,
}

impl Grid1D {
    /// Maximum length: offsets are `i32`, so indices must stay addressable.
    pub const MAX_LEN: usize = i32::MAX as usize;

    /// Wrap existing cells.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` for an empty vector, or
    /// `Err(SpaceError::DimensionTooLarge)` past [`MAX_LEN`](Self::MAX_LEN).
    pub fn from_cells(cells: Vec<Cell>) -> Result<Self, SpaceError> {
        check_len(cells.len())?;
        Ok(Self { cells })
    }

    /// Build a grid of species-less cells from alive-states.
    pub fn from_states(states: impl IntoIterator<Item = bool>) -> Result<Self, SpaceError> {
        Self::from_cells(states.into_iter().map(Cell::new).collect())
    }

    /// `len` dead cells.
    pub fn empty(len: usize) -> Result<Self, SpaceError> {
        check_len(len)?;
        Ok(Self {
            cells: vec![Cell::DEAD; len],
        })
    }

    /// `len` dead cells with only the centre cell (`len / 2`) alive.
    pub fn point(len: usize) -> Result<Self, SpaceError> {
        let mut grid = Self::empty(len)?;
        grid.cells[len / 2] = Cell::ALIVE;
        Ok(grid)
    }

    /// `len` cells, each alive with probability `density`.
    pub fn random<R: Rng + ?Sized>(
        len: usize,
        density: f64,
        rng: &mut R,
    ) -> Result<Self, SpaceError> {
        check_density(density)?;
        check_len(len)?;
        let cells = (0..len)
            .map(|_| Cell::new(rng.gen::<f64>() < density))
            .collect();
        Ok(Self { cells })
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always returns `false`: construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The cell at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Replace the cell at `index`.
    pub fn set(&mut self, index: usize, cell: Cell) -> Result<(), SpaceError> {
        let len = self.cells.len();
        match self.cells.get_mut(index) {
            Some(slot) => {
                *slot = cell;
                Ok(())
            }
            None => Err(SpaceError::CoordOutOfBounds {
                coord: index as i64,
                size: len,
            }),
        }
    }

    /// Iterate over the cells left to right.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

pub(crate) fn check_len(len: usize) -> Result<(), SpaceError> {
    if len == 0 {
        return Err(SpaceError::EmptySpace);
    }
    if len > Grid1D::MAX_LEN {
        return Err(SpaceError::DimensionTooLarge {
            name: "len",
            value: len,
            max: Grid1D::MAX_LEN,
        });
    }
    Ok(())
}

pub(crate) fn check_density(density: f64) -> Result<(), SpaceError> {
    if !(0.0..=1.0).contains(&density) {
        return Err(SpaceError::InvalidDensity { value: density });
    }
    Ok(())
}

impl Lattice for Grid1D {
    type Offset = i32;

    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn shape(&self) -> (usize, usize) {
        (1, self.cells.len())
    }

    fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    #[inline]
    fn neighbour_index(
        &self,
        index: usize,
        offset: i32,
        boundary: BoundaryPolicy,
    ) -> Result<usize, SpaceError> {
        boundary.resolve(index as i64 + i64::from(offset), self.cells.len())
    }
}

/// `#` for living cells, a space for dead ones.
impl fmt::Display for Grid1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", if cell.alive { '#' } else { ' ' })?;
        }
        Ok(())
    }
}
