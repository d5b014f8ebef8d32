//! Test fixtures for Cellum development.
//!
//! Small, well-known patterns ([`fixtures`]) and helpers for building and
//! comparing grids in engine tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::*;

use cellum_core::Cell;
use cellum_space::seed::{decode_line, decode_rows};
use cellum_space::{Grid1D, Grid2D};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG for tests.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Parse a `-` / `X` line, panicking on bad input.
pub fn line(text: &str) -> Grid1D {
    decode_line(text).unwrap_or_else(|e| panic!("bad test line {text:?}: {e}"))
}

/// Parse `-` / `X` rows. Leading and trailing blank lines and per-line
/// indentation are ignored so fixtures can be written as indented raw
/// strings.
pub fn grid_from_text(text: &str) -> Grid2D {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    decode_rows(&rows.join("\n")).unwrap_or_else(|e| panic!("bad test grid: {e}"))
}

/// `grid` shifted by `(dy, dx)` on a torus.
pub fn translate(grid: &Grid2D, dy: isize, dx: isize) -> Grid2D {
    let (h, w) = (grid.height() as isize, grid.width() as isize);
    let mut out = Grid2D::empty(grid.height(), grid.width()).expect("non-empty source grid");
    for (row, col) in grid.alive_positions() {
        let r = (row as isize + dy).rem_euclid(h) as usize;
        let c = (col as isize + dx).rem_euclid(w) as usize;
        out.set(r, c, Cell::ALIVE).expect("wrapped position in range");
    }
    out
}
