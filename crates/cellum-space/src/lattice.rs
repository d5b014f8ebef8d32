//! The `Lattice` trait shared by 1D and 2D grids.

use crate::boundary::BoundaryPolicy;
use crate::error::SpaceError;
use cellum_core::Cell;
use std::fmt::Debug;
use std::hash::Hash;

/// A fixed-shape container of cells with neighbour resolution.
///
/// The engine is written against this trait so that the same advance
/// loop drives [`Grid1D`](crate::Grid1D) and [`Grid2D`](crate::Grid2D).
/// Cells are exposed as a flat slice in canonical order (left to right,
/// rows top to bottom); flat indices are what neighbour resolution
/// returns.
///
/// # Thread Safety
///
/// `Sync` is required so a prior generation can be read from several
/// worker threads while the successor is being computed.
pub trait Lattice: Clone + Debug + Send + Sync + 'static {
    /// Relative offset type used by neighbourhoods on this lattice.
    type Offset: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    /// Total number of cells. Never zero.
    fn cell_count(&self) -> usize;

    /// `(rows, cols)`; 1D grids report a single row.
    fn shape(&self) -> (usize, usize);

    /// All cells in canonical order.
    fn cells(&self) -> &[Cell];

    /// All cells in canonical order, mutably. The shape cannot change.
    fn cells_mut(&mut self) -> &mut [Cell];

    /// Flat index of the neighbour at `offset` from the cell at `index`,
    /// with out-of-range coordinates mapped through `boundary`.
    fn neighbour_index(
        &self,
        index: usize,
        offset: Self::Offset,
        boundary: BoundaryPolicy,
    ) -> Result<usize, SpaceError>;

    /// Check that `other` has exactly this lattice's shape.
    fn check_same_shape(&self, other: &Self) -> Result<(), SpaceError> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(SpaceError::ShapeMismatch {
                expected: self.shape(),
                found: other.shape(),
            })
        }
    }

    /// Number of living cells.
    fn alive_count(&self) -> usize {
        self.cells().iter().filter(|c| c.alive).count()
    }
}
