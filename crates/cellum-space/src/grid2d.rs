//! 2D row-major grid of cells.

use crate::boundary::BoundaryPolicy;
use crate::error::SpaceError;
use crate::lattice::Lattice;
use crate::line1d::check_density;
use cellum_core::Cell;
use rand::Rng;
use std::fmt;

/// A two-dimensional grid of `height x width` cells.
///
/// Cells are addressed by `(row, col)` and stored row-major, so the flat
/// index of `(row, col)` is `row * width + col`. Neighbour offsets are
/// `(dy, dx)` and each axis is resolved independently through the
/// [`BoundaryPolicy`].
///
/// # Examples
///
/// ```
/// use cellum_space::{BoundaryPolicy, Grid2D, Lattice};
///
/// let grid = Grid2D::empty(4, 6).unwrap();
/// assert_eq!(grid.shape(), (4, 6));
///
/// // Up-left of the origin wraps to the bottom-right corner.
/// let i = grid.neighbour_index(0, (-1, -1), BoundaryPolicy::Wrap).unwrap();
/// assert_eq!(grid.position(i), (3, 5));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid2D {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Grid2D {
    /// Maximum extent of either axis.
    pub const MAX_DIM: usize = i32::MAX as usize;

    /// `height x width` dead cells.
    pub fn empty(height: usize, width: usize) -> Result<Self, SpaceError> {
        let count = check_dims(height, width)?;
        Ok(Self {
            height,
            width,
            cells: vec![Cell::DEAD; count],
        })
    }

    /// Build from rows of cells. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, SpaceError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        check_dims(height, width)?;
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(SpaceError::RaggedRows {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
        }
        Ok(Self {
            height,
            width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// `height x width` cells, each alive with probability `density`.
    pub fn random<R: Rng + ?Sized>(
        height: usize,
        width: usize,
        density: f64,
        rng: &mut R,
    ) -> Result<Self, SpaceError> {
        check_density(density)?;
        let count = check_dims(height, width)?;
        let cells = (0..count)
            .map(|_| Cell::new(rng.gen::<f64>() < density))
            .collect();
        Ok(Self {
            height,
            width,
            cells,
        })
    }

    /// A 10x10 grid holding the classic glider at
    /// `(1,1), (1,3), (2,2), (2,3), (3,2)`.
    pub fn glider_demo() -> Self {
        let mut grid = Self {
            height: 10,
            width: 10,
            cells: vec![Cell::DEAD; 100],
        };
        for (row, col) in [(1, 1), (1, 3), (2, 2), (2, 3), (3, 2)] {
            grid.cells[row * 10 + col] = Cell::ALIVE;
        }
        grid
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Flat index of `(row, col)`, if in range.
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    /// `(row, col)` of a flat index.
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }

    /// The cell at `(row, col)`, if in range.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    /// Replace the cell at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), SpaceError> {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = cell;
            return Ok(());
        }
        let (coord, size) = if row >= self.height {
            (row, self.height)
        } else {
            (col, self.width)
        };
        Err(SpaceError::CoordOutOfBounds {
            coord: coord as i64,
            size,
        })
    }

    /// Iterate over rows top to bottom.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, Cell> {
        self.cells.chunks_exact(self.width)
    }

    /// `(row, col)` of every living cell in row-major order.
    pub fn alive_positions(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.alive)
            .map(|(i, _)| self.position(i))
            .collect()
    }
}

/// Validate dimensions and return the cell count.
fn check_dims(height: usize, width: usize) -> Result<usize, SpaceError> {
    if height == 0 || width == 0 {
        return Err(SpaceError::EmptySpace);
    }
    for (name, value) in [("height", height), ("width", width)] {
        if value > Grid2D::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name,
                value,
                max: Grid2D::MAX_DIM,
            });
        }
    }
    height
        .checked_mul(width)
        .ok_or(SpaceError::DimensionTooLarge {
            name: "cell count",
            value: usize::MAX,
            max: usize::MAX,
        })
}

impl Lattice for Grid2D {
    type Offset = (i32, i32);

    fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
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
        (dy, dx): (i32, i32),
        boundary: BoundaryPolicy,
    ) -> Result<usize, SpaceError> {
        let (row, col) = self.position(index);
        let r = boundary.resolve(row as i64 + i64::from(dy), self.height)?;
        let c = boundary.resolve(col as i64 + i64::from(dx), self.width)?;
        Ok(r * self.width + c)
    }
}

/// One text line per row, `#` alive and space dead.
impl fmt::Display for Grid2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", if cell.alive { '#' } else { ' ' })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use crate::neighbourhood::Neighbourhood2D;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn empty_rejects_zero_axes() {
        assert_eq!(Grid2D::empty(0, 5), Err(SpaceError::EmptySpace));
        assert_eq!(Grid2D::empty(5, 0), Err(SpaceError::EmptySpace));
        assert_eq!(Grid2D::from_rows(vec![]), Err(SpaceError::EmptySpace));
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let rows = vec![vec![Cell::DEAD; 3], vec![Cell::DEAD; 2]];
        assert_eq!(
            Grid2D::from_rows(rows),
            Err(SpaceError::RaggedRows {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn from_rows_is_row_major() {
        let rows = vec![
            vec![Cell::ALIVE, Cell::DEAD],
            vec![Cell::DEAD, Cell::DEAD],
            vec![Cell::DEAD, Cell::ALIVE],
        ];
        let g = Grid2D::from_rows(rows).unwrap();
        assert_eq!(g.shape(), (3, 2));
        assert_eq!(g.alive_positions(), vec![(0, 0), (2, 1)]);
        assert_eq!(g.rows().count(), 3);
    }

    #[test]
    fn glider_demo_positions() {
        let g = Grid2D::glider_demo();
        assert_eq!(
            g.alive_positions(),
            vec![(1, 1), (1, 3), (2, 2), (2, 3), (3, 2)]
        );
    }

    #[test]
    fn set_and_get() {
        let mut g = Grid2D::empty(3, 4).unwrap();
        g.set(2, 3, Cell::ALIVE).unwrap();
        assert!(g.get(2, 3).unwrap().alive);
        assert!(g.get(3, 0).is_none());
        assert_eq!(
            g.set(0, 4, Cell::ALIVE),
            Err(SpaceError::CoordOutOfBounds { coord: 4, size: 4 })
        );
    }

    #[test]
    fn neighbour_wrap_corner() {
        let g = Grid2D::empty(3, 4).unwrap();
        let i = g.neighbour_index(0, (-1, -1), BoundaryPolicy::Wrap).unwrap();
        assert_eq!(g.position(i), (2, 3));
        let last = g.index(2, 3).unwrap();
        let i = g.neighbour_index(last, (1, 1), BoundaryPolicy::Wrap).unwrap();
        assert_eq!(g.position(i), (0, 0));
    }

    #[test]
    fn neighbour_clip_corner() {
        let g = Grid2D::empty(3, 4).unwrap();
        let i = g.neighbour_index(0, (-1, -1), BoundaryPolicy::Clip).unwrap();
        assert_eq!(g.position(i), (0, 0));
        let i = g.neighbour_index(0, (-1, 1), BoundaryPolicy::Clip).unwrap();
        assert_eq!(g.position(i), (0, 1));
    }

    #[test]
    fn display_rows() {
        let g = Grid2D::from_rows(vec![
            vec![Cell::ALIVE, Cell::DEAD],
            vec![Cell::DEAD, Cell::ALIVE],
        ])
        .unwrap();
        assert_eq!(g.to_string(), "# \n #");
    }

    #[test]
    fn random_is_seeded() {
        let a = Grid2D::random(8, 8, 0.4, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        let b = Grid2D::random(8, 8, 0.4, &mut ChaCha8Rng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn compliance_moore() {
        let g = Grid2D::empty(6, 7).unwrap();
        compliance::run_full_compliance(&g, Neighbourhood2D::moore().offsets());
    }

    #[test]
    fn compliance_von_neumann_two() {
        let g = Grid2D::empty(5, 5).unwrap();
        let n = Neighbourhood2D::von_neumann(2).unwrap();
        compliance::run_full_compliance(&g, n.offsets());
    }

    proptest! {
        #[test]
        fn neighbours_always_in_range(
            h in 1usize..20,
            w in 1usize..20,
            index in 0usize..400,
            dy in -50i32..50,
            dx in -50i32..50,
        ) {
            let g = Grid2D::empty(h, w).unwrap();
            let index = index % g.cell_count();
            for policy in [BoundaryPolicy::Wrap, BoundaryPolicy::Clip] {
                let n = g.neighbour_index(index, (dy, dx), policy).unwrap();
                prop_assert!(n < g.cell_count());
            }
        }
    }
}
