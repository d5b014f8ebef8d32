//! Well-known Game of Life patterns placed on small grids.

use cellum_core::Cell;
use cellum_space::{Grid1D, Grid2D};

fn place(height: usize, width: usize, alive: &[(usize, usize)]) -> Grid2D {
    let mut grid = Grid2D::empty(height, width).expect("fixture dims are non-zero");
    for &(row, col) in alive {
        grid.set(row, col, Cell::ALIVE).expect("fixture cell in range");
    }
    grid
}

/// 2x2 block (still life) in the middle of a 6x6 grid.
pub fn block() -> Grid2D {
    place(6, 6, &[(2, 2), (2, 3), (3, 2), (3, 3)])
}

/// Horizontal blinker (period 2) in the middle of a 5x5 grid.
pub fn blinker() -> Grid2D {
    place(5, 5, &[(2, 1), (2, 2), (2, 3)])
}

/// Vertical phase of [`blinker`].
pub fn blinker_vertical() -> Grid2D {
    place(5, 5, &[(1, 2), (2, 2), (3, 2)])
}

/// South-east glider on an 8x8 grid.
pub fn glider() -> Grid2D {
    place(8, 8, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)])
}

/// `len` dead cells.
pub fn dead_line(len: usize) -> Grid1D {
    Grid1D::empty(len).expect("dead_line needs len > 0")
}

/// `height x width` dead cells.
pub fn dead_grid(height: usize, width: usize) -> Grid2D {
    place(height, width, &[])
}
