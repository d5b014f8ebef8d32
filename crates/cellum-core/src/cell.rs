//! The cell value type.

use crate::id::SpeciesId;
use smallvec::SmallVec;

/// Alive-states of a cell's neighbours, in neighbourhood order.
///
/// Inline capacity covers every radius-15 1D neighbourhood and the
/// common 2D stencils without touching the heap.
pub type NeighbourStates = SmallVec<[bool; 32]>;

/// A single cell of a generation.
///
/// Cells are plain values. A generation transition writes whole new
/// cells into a separate buffer; a cell that other cells are still
/// reading from is never modified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Whether the cell is alive.
    pub alive: bool,
    /// Species tag; `None` outside multi-species simulations.
    pub species: Option<SpeciesId>,
}

impl Cell {
    /// A dead cell without a species.
    pub const DEAD: Cell = Cell {
        alive: false,
        species: None,
    };

    /// A living cell without a species.
    pub const ALIVE: Cell = Cell {
        alive: true,
        species: None,
    };

    /// A cell without a species.
    pub fn new(alive: bool) -> Self {
        Self {
            alive,
            species: None,
        }
    }

    /// A cell belonging to `species`.
    pub fn with_species(alive: bool, species: SpeciesId) -> Self {
        Self {
            alive,
            species: Some(species),
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        Self::new(alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_match_constructors() {
        assert_eq!(Cell::DEAD, Cell::new(false));
        assert_eq!(Cell::ALIVE, Cell::from(true));
        assert_eq!(Cell::default(), Cell::DEAD);
    }

    #[test]
    fn species_participates_in_equality() {
        let a = Cell::with_species(true, SpeciesId(0));
        let b = Cell::with_species(true, SpeciesId(1));
        assert_ne!(a, b);
        assert_ne!(a, Cell::ALIVE);
    }
}
