//! Benchmark profiles for the Cellum automaton engine.
//!
//! Seeded grid and transition pairs shared by the benches:
//!
//! - [`life_profile`]: random 256x256 Game of Life torus
//! - [`wolfram_profile`]: a 4096-cell line under rule 110
//! - [`species_profile`]: a 4096-cell line of the three built-in species

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cellum_engine::{Automaton, ConfigError, SpeciesAutomaton, SpeciesRegistry};
use cellum_space::{BoundaryPolicy, Grid1D, Grid2D};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Side of the square Life grid.
pub const LIFE_SIDE: usize = 256;

/// Length of the 1D benchmark lines.
pub const LINE_LEN: usize = 4096;

/// A random Life grid at 35% density with the aggregate rule on a torus.
pub fn life_profile(seed: u64) -> Result<(Grid2D, Automaton<(i32, i32)>), ConfigError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let grid = Grid2D::random(LIFE_SIDE, LIFE_SIDE, 0.35, &mut rng)?;
    Ok((grid, Automaton::game_of_life(BoundaryPolicy::Wrap)?))
}

/// Same grid as [`life_profile`] with the exact-pattern Life table.
pub fn life_exact_profile(seed: u64) -> Result<(Grid2D, Automaton<(i32, i32)>), ConfigError> {
    let (grid, _) = life_profile(seed)?;
    Ok((grid, Automaton::game_of_life_exact(BoundaryPolicy::Wrap)?))
}

/// A random line under elementary rule 110.
pub fn wolfram_profile(seed: u64) -> Result<(Grid1D, Automaton<i32>), ConfigError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let grid = Grid1D::random(LINE_LEN, 0.5, &mut rng)?;
    Ok((grid, Automaton::wolfram(110, 3, BoundaryPolicy::Wrap)?))
}

/// A random line of the built-in species with a seeded tie-break.
pub fn species_profile(seed: u64) -> Result<(Grid1D, SpeciesAutomaton<i32>), ConfigError> {
    let registry = SpeciesRegistry::triad()?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let grid = registry.random_line(LINE_LEN, 0.5, &mut rng)?;
    Ok((grid, SpeciesAutomaton::new(registry, BoundaryPolicy::Wrap, seed)?))
}
