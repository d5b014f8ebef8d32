//! Line-based seed encoding.
//!
//! A 1D seed is a single line of glyphs: [`DEAD_GLYPH`] marks a dead
//! cell, anything else a living one. In multi-species mode the glyph of
//! a living cell names its species. A 2D seed is one such line per row.
//! Exactly one trailing line ending is stripped; nothing else is trimmed.

use crate::error::SpaceError;
use crate::grid2d::Grid2D;
use crate::line1d::Grid1D;
use cellum_core::{Cell, SpeciesId};

/// Glyph of a dead cell.
pub const DEAD_GLYPH: char = '-';

/// Glyph written for a living species-less cell by [`plain_glyph`].
pub const ALIVE_GLYPH: char = 'X';

/// Remove a single trailing `\n` or `\r\n`.
pub fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line)
}

/// `X` for living cells, `-` for dead ones.
pub fn plain_glyph(cell: &Cell) -> char {
    if cell.alive {
        ALIVE_GLYPH
    } else {
        DEAD_GLYPH
    }
}

/// Decode a 1D seed of species-less cells.
///
/// ```
/// use cellum_space::seed::decode_line;
///
/// let grid = decode_line("--X-#\n").unwrap();
/// assert_eq!(grid.len(), 5);
/// assert_eq!(cellum_space::Lattice::alive_count(&grid), 2);
/// ```
pub fn decode_line(line: &str) -> Result<Grid1D, SpaceError> {
    Grid1D::from_states(strip_line_ending(line).chars().map(|c| c != DEAD_GLYPH))
}

/// Decode a 1D seed whose living glyphs name species.
///
/// Dead cells receive `dead_species`. `lookup` maps a glyph to its
/// species; a glyph it does not know is an error rather than a skipped
/// cell, so the decoded grid always has one cell per glyph.
pub fn decode_species_line<F>(
    line: &str,
    dead_species: SpeciesId,
    lookup: F,
) -> Result<Grid1D, SpaceError>
where
    F: Fn(char) -> Option<SpeciesId>,
{
    let cells = strip_line_ending(line)
        .chars()
        .enumerate()
        .map(|(position, glyph)| {
            if glyph == DEAD_GLYPH {
                return Ok(Cell::with_species(false, dead_species));
            }
            lookup(glyph)
                .map(|species| Cell::with_species(true, species))
                .ok_or(SpaceError::UnknownGlyph { glyph, position })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Grid1D::from_cells(cells)
}

/// Decode a 2D seed, one line per row.
///
/// A single empty trailing line (from a final newline) is ignored.
pub fn decode_rows(text: &str) -> Result<Grid2D, SpaceError> {
    let rows = text
        .lines()
        .map(|line| line.chars().map(|c| Cell::new(c != DEAD_GLYPH)).collect())
        .collect();
    Grid2D::from_rows(rows)
}

/// Encode a 1D grid as a single line, without a line ending.
pub fn encode_line<F>(grid: &Grid1D, glyph: F) -> String
where
    F: Fn(&Cell) -> char,
{
    grid.iter().map(glyph).collect()
}

/// Encode a 2D grid, one line per row, each terminated by `\n`.
pub fn encode_rows<F>(grid: &Grid2D, glyph: F) -> String
where
    F: Fn(&Cell) -> char,
{
    let mut out = String::with_capacity(grid.height() * (grid.width() + 1));
    for row in grid.rows() {
        out.extend(row.iter().map(&glyph));
        out.push('\n');
    }
    out
}
