//! Generation advance.
//!
//! A [`Transition`] reads one generation and writes its successor into a
//! caller-owned buffer of the same shape. Every cell is evaluated against
//! the unmodified prior generation, so evaluation order never affects the
//! result.
//!
//! Two transitions are provided:
//!
//! - [`Automaton`]: one neighbourhood and rule for every cell
//! - [`SpeciesAutomaton`]: each cell uses its species' neighbourhood and
//!   rule, and surviving or newborn cells take the majority species of
//!   their living neighbours

use cellum_core::{Cell, NeighbourStates, Outcome, SpeciesId};
use cellum_rule::{AggregateCountTable, Rule, RuleTable};
use cellum_space::{BoundaryPolicy, Lattice};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

use crate::config::{Automaton, ConfigError};
use crate::error::StepError;
use crate::mutation::Mutation;
use crate::species::SpeciesRegistry;

/// Computes the successor of a generation.
pub trait Transition<L: Lattice> {
    /// Check that `grid` can be advanced by this transition.
    ///
    /// Called once by the runner before the first advance.
    fn validate(&self, grid: &L) -> Result<(), ConfigError>;

    /// Write the successor of `prev` into `next` and return the number of
    /// cells that changed.
    ///
    /// `next` must have the shape of `prev`; its prior contents are
    /// overwritten.
    fn advance_into(&mut self, prev: &L, next: &mut L) -> Result<usize, StepError>;
}

/// A successor generation and its change count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Advance<L> {
    /// The new generation.
    pub grid: L,
    /// Cells whose alive-state or species differs from the prior generation.
    pub changed: usize,
}

/// Advance `grid` by one generation into a fresh grid.
pub fn advance<L, T>(grid: &L, transition: &mut T) -> Result<Advance<L>, StepError>
where
    L: Lattice,
    T: Transition<L>,
{
    let mut next = grid.clone();
    let changed = transition.advance_into(grid, &mut next)?;
    Ok(Advance {
        grid: next,
        changed,
    })
}

/// Advance `grid` by `generations` generations, summing the change counts.
///
/// Zero generations returns a copy of `grid` with no changes.
pub fn advance_by<L, T>(
    grid: &L,
    transition: &mut T,
    generations: u64,
) -> Result<Advance<L>, StepError>
where
    L: Lattice,
    T: Transition<L>,
{
    let mut current = grid.clone();
    let mut scratch = grid.clone();
    let mut changed = 0;
    for _ in 0..generations {
        changed += transition.advance_into(&current, &mut scratch)?;
        std::mem::swap(&mut current, &mut scratch);
    }
    Ok(Advance {
        grid: current,
        changed,
    })
}

/// Fill `states` with the alive-state of each neighbour of `index`.
#[inline]
fn sample<L: Lattice>(
    grid: &L,
    index: usize,
    offsets: &[L::Offset],
    boundary: BoundaryPolicy,
    states: &mut NeighbourStates,
) -> Result<(), StepError> {
    states.clear();
    let cells = grid.cells();
    for &offset in offsets {
        let n = grid.neighbour_index(index, offset, boundary)?;
        states.push(cells[n].alive);
    }
    Ok(())
}

// ── Uniform rule ───────────────────────────────────────────────────

impl<O: Copy> Automaton<O> {
    /// Next state of the cell at `index`. Species tags are carried over.
    fn next_cell<L>(
        &self,
        prev: &L,
        index: usize,
        states: &mut NeighbourStates,
    ) -> Result<Cell, StepError>
    where
        L: Lattice<Offset = O>,
    {
        sample(prev, index, self.neighbourhood().offsets(), self.boundary(), states)?;
        let cell = prev.cells()[index];
        Ok(Cell {
            alive: self.rule().evaluate(states, cell.alive),
            species: cell.species,
        })
    }
}

#[cfg(not(feature = "parallel"))]
fn advance_plain<L: Lattice>(
    automaton: &Automaton<L::Offset>,
    prev: &L,
    next: &mut L,
) -> Result<usize, StepError> {
    let cells = prev.cells();
    let mut states = NeighbourStates::new();
    let mut changed = 0;
    for (index, out) in next.cells_mut().iter_mut().enumerate() {
        let cell = automaton.next_cell(prev, index, &mut states)?;
        changed += usize::from(cell != cells[index]);
        *out = cell;
    }
    Ok(changed)
}

#[cfg(feature = "parallel")]
fn advance_plain<L: Lattice>(
    automaton: &Automaton<L::Offset>,
    prev: &L,
    next: &mut L,
) -> Result<usize, StepError> {
    use rayon::prelude::*;

    let cells = prev.cells();
    next.cells_mut()
        .par_iter_mut()
        .enumerate()
        .map_init(NeighbourStates::new, |states, (index, out)| {
            let cell = automaton.next_cell(prev, index, states)?;
            let changed = usize::from(cell != cells[index]);
            *out = cell;
            Ok(changed)
        })
        .try_reduce(|| 0, |a, b| Ok(a + b))
}

/// Count-rule advance with perturbed neighbour counts.
///
/// Always sequential: noise is drawn in cell index order so a seed
/// reproduces the run.
fn advance_mutated<L: Lattice>(
    prev: &L,
    next: &mut L,
    offsets: &[L::Offset],
    boundary: BoundaryPolicy,
    table: &AggregateCountTable,
    mutation: &mut Mutation,
) -> Result<usize, StepError> {
    let cells = prev.cells();
    let mut states = NeighbourStates::new();
    let mut changed = 0;
    for (index, out) in next.cells_mut().iter_mut().enumerate() {
        sample(prev, index, offsets, boundary, &mut states)?;
        let count = states.iter().filter(|&&alive| alive).count();
        let count = mutation.perturb(count, offsets.len());
        let cell = cells[index];
        let successor = Cell {
            alive: table.get(count).apply(cell.alive),
            species: cell.species,
        };
        changed += usize::from(successor != cell);
        *out = successor;
    }
    Ok(changed)
}

impl<L: Lattice> Transition<L> for Automaton<L::Offset> {
    fn validate(&self, grid: &L) -> Result<(), ConfigError> {
        if grid.cell_count() == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        Automaton::validate(self)
    }

    fn advance_into(&mut self, prev: &L, next: &mut L) -> Result<usize, StepError> {
        prev.check_same_shape(next)?;
        if let (Some(mutation), RuleTable::Aggregate(table)) = (self.mutation.as_mut(), &self.rule)
        {
            return advance_mutated(
                prev,
                next,
                self.neighbourhood.offsets(),
                self.boundary,
                table,
                mutation,
            );
        }
        advance_plain(self, prev, next)
    }
}

// ── Multi-species ──────────────────────────────────────────────────

/// Transition where each cell follows its own species.
///
/// Per cell: the species' rule is evaluated over the species'
/// neighbourhood. On [`Outcome::Die`] the cell dies and keeps its species.
/// Otherwise the cell takes the majority species among its living
/// neighbours, with its own species entered first at a count of zero so
/// it is kept when no neighbour is alive. Ties are broken uniformly at
/// random with a seeded [`ChaCha8Rng`]; [`Outcome::Live`] makes the cell
/// alive and [`Outcome::Unchanged`] keeps its alive-state.
///
/// Cells are evaluated in index order so a given seed always reproduces
/// the same run.
#[derive(Clone, Debug)]
pub struct SpeciesAutomaton<O> {
    registry: SpeciesRegistry<O>,
    boundary: BoundaryPolicy,
    rng: ChaCha8Rng,
}

impl<O: Copy + PartialEq> SpeciesAutomaton<O> {
    /// Build a species transition with a seeded tie-break RNG.
    pub fn new(
        registry: SpeciesRegistry<O>,
        boundary: BoundaryPolicy,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        if registry.is_empty() {
            return Err(ConfigError::EmptyRegistry);
        }
        Ok(Self {
            registry,
            boundary,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// The registered species.
    pub fn registry(&self) -> &SpeciesRegistry<O> {
        &self.registry
    }

    /// How out-of-range neighbours are mapped back onto the grid.
    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }
}

/// Living-neighbour tally in first-seen order.
type Votes = SmallVec<[(SpeciesId, usize); 8]>;

fn tally(votes: &mut Votes, species: SpeciesId) {
    match votes.iter_mut().find(|(s, _)| *s == species) {
        Some((_, count)) => *count += 1,
        None => votes.push((species, 1)),
    }
}

/// Most-voted species; ties are drawn uniformly from `rng`.
fn majority(votes: &Votes, own: SpeciesId, rng: &mut ChaCha8Rng) -> SpeciesId {
    let best = votes.iter().map(|&(_, c)| c).max().unwrap_or(0);
    let tied: SmallVec<[SpeciesId; 8]> = votes
        .iter()
        .filter(|&&(_, c)| c == best)
        .map(|&(s, _)| s)
        .collect();
    match tied.as_slice() {
        [only] => *only,
        _ => tied.choose(rng).copied().unwrap_or(own),
    }
}

impl<L: Lattice> Transition<L> for SpeciesAutomaton<L::Offset> {
    fn validate(&self, grid: &L) -> Result<(), ConfigError> {
        if grid.cell_count() == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        for (index, cell) in grid.cells().iter().enumerate() {
            let species = cell.species.ok_or(ConfigError::MissingSpecies { index })?;
            if !self.registry.contains(species) {
                return Err(ConfigError::UnknownSpecies { species });
            }
        }
        Ok(())
    }

    fn advance_into(&mut self, prev: &L, next: &mut L) -> Result<usize, StepError> {
        prev.check_same_shape(next)?;
        let Self {
            registry,
            boundary,
            rng,
        } = self;
        let cells = prev.cells();
        let mut states = NeighbourStates::new();
        let mut votes = Votes::new();
        let mut changed = 0;

        for (index, out) in next.cells_mut().iter_mut().enumerate() {
            let cell = cells[index];
            let own = cell.species.ok_or(StepError::MissingSpecies { index })?;
            let species = registry
                .get(own)
                .ok_or(StepError::UnknownSpecies { species: own })?;
            let offsets = species.neighbourhood().offsets();
            sample(prev, index, offsets, *boundary, &mut states)?;

            let successor = match species.rule().outcome(&states) {
                Outcome::Die => Cell::with_species(false, own),
                outcome => {
                    votes.clear();
                    votes.push((own, 0));
                    for &offset in offsets {
                        let n = prev.neighbour_index(index, offset, *boundary)?;
                        let neighbour = cells[n];
                        if neighbour.alive {
                            let s = neighbour
                                .species
                                .ok_or(StepError::MissingSpecies { index: n })?;
                            tally(&mut votes, s);
                        }
                    }
                    let winner = majority(&votes, own, rng);
                    Cell::with_species(outcome.apply(cell.alive), winner)
                }
            };
            changed += usize::from(successor != cell);
            *out = successor;
        }
        Ok(changed)
    }
}
