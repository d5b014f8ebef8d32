//! Grid state keys and digests.
//!
//! Cycle detection stores an exact [`StateKey`] per generation, so two
//! generations are only treated as equal when every cell matches. The
//! FNV-1a [`grid_digest`] is a compact fingerprint for logs and sinks and
//! plays no part in repeat detection.

use std::hash::{BuildHasherDefault, Hasher};

use cellum_space::Lattice;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_bytes(hash: u64, bytes: &[u8]) -> u64 {
    bytes.iter().fold(hash, |h, &b| fnv1a_byte(h, b))
}

/// A streaming FNV-1a [`Hasher`].
#[derive(Clone, Copy, Debug)]
pub struct Fnv1aHasher(u64);

impl Default for Fnv1aHasher {
    fn default() -> Self {
        Self(FNV_OFFSET)
    }
}

impl Hasher for Fnv1aHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.0 = fnv1a_bytes(self.0, bytes);
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// `BuildHasher` for hash collections keyed by [`StateKey`].
pub type FnvBuildHasher = BuildHasherDefault<Fnv1aHasher>;

/// Exact packed encoding of a generation.
///
/// Alive-states are packed 64 per word. Species tags are stored as
/// `id + 1` per cell (0 for none), and omitted entirely when no cell
/// carries a species.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateKey {
    alive: Vec<u64>,
    species: Vec<u32>,
}

impl StateKey {
    /// Encode a grid.
    pub fn of<L: Lattice>(grid: &L) -> Self {
        let cells = grid.cells();
        let alive = cells
            .chunks(64)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u64, |w, (i, c)| w | (u64::from(c.alive) << i))
            })
            .collect();
        let species = if cells.iter().any(|c| c.species.is_some()) {
            cells
                .iter()
                .map(|c| c.species.map_or(0, |s| s.0.saturating_add(1)))
                .collect()
        } else {
            Vec::new()
        };
        Self { alive, species }
    }
}

/// 64-bit FNV-1a digest of a grid's shape and cells.
pub fn grid_digest<L: Lattice>(grid: &L) -> u64 {
    let (rows, cols) = grid.shape();
    let mut hash = FNV_OFFSET;
    hash = fnv1a_bytes(hash, &(rows as u64).to_le_bytes());
    hash = fnv1a_bytes(hash, &(cols as u64).to_le_bytes());
    for cell in grid.cells() {
        hash = fnv1a_byte(hash, u8::from(cell.alive));
        let tag = cell.species.map_or(0, |s| s.0.saturating_add(1));
        hash = fnv1a_bytes(hash, &tag.to_le_bytes());
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellum_core::{Cell, SpeciesId};
    use cellum_space::Grid1D;
    use indexmap::IndexSet;
    use std::hash::Hash;

    #[test]
    fn hasher_matches_reference_vectors() {
        let mut h = Fnv1aHasher::default();
        assert_eq!(h.finish(), 0xcbf29ce484222325);
        h.write(b"a");
        assert_eq!(h.finish(), 0xaf63dc4c8601ec8c);
    }

    #[test]
    fn keys_distinguish_alive_states() {
        let a = Grid1D::from_states([true, false, false]).unwrap();
        let b = Grid1D::from_states([false, true, false]).unwrap();
        assert_ne!(StateKey::of(&a), StateKey::of(&b));
        assert_eq!(StateKey::of(&a), StateKey::of(&a.clone()));
    }

    #[test]
    fn keys_distinguish_species() {
        let a = Grid1D::from_cells(vec![Cell::with_species(true, SpeciesId(0))]).unwrap();
        let b = Grid1D::from_cells(vec![Cell::with_species(true, SpeciesId(1))]).unwrap();
        assert_ne!(StateKey::of(&a), StateKey::of(&b));
        assert_ne!(grid_digest(&a), grid_digest(&b));
    }

    #[test]
    fn keys_span_word_boundaries() {
        let mut states = vec![false; 130];
        states[129] = true;
        let a = Grid1D::from_states(states.clone()).unwrap();
        states[129] = false;
        states[65] = true;
        let b = Grid1D::from_states(states).unwrap();
        assert_ne!(StateKey::of(&a), StateKey::of(&b));
    }

    #[test]
    fn digest_includes_shape() {
        let a = Grid1D::empty(4).unwrap();
        let b = Grid1D::empty(5).unwrap();
        assert_ne!(grid_digest(&a), grid_digest(&b));
    }

    #[test]
    fn index_set_with_fnv() {
        let mut seen: IndexSet<StateKey, FnvBuildHasher> = IndexSet::default();
        let g = Grid1D::point(9).unwrap();
        assert!(seen.insert(StateKey::of(&g)));
        assert!(!seen.insert(StateKey::of(&g)));
        assert_eq!(seen.get_index_of(&StateKey::of(&g)), Some(0));

        let mut h = Fnv1aHasher::default();
        StateKey::of(&g).hash(&mut h);
        assert_ne!(h.finish(), FNV_OFFSET);
    }
}
