//! Species and the species registry.
//!
//! In multi-species mode every cell carries a [`SpeciesId`]. The species
//! decides which neighbourhood and rule govern the cell; the majority
//! vote in [`SpeciesAutomaton`](crate::SpeciesAutomaton) decides which
//! species a surviving or newborn cell belongs to.

use std::hash::{Hash, Hasher};

use cellum_core::{Cell, SpeciesId};
use cellum_rule::{presets, RuleTable};
use cellum_space::{Grid1D, Neighbourhood, Neighbourhood1D};
use rand::Rng;

use crate::config::{check_rule, ConfigError};

/// A kind of cell: how it samples its neighbours and the rule it obeys.
///
/// Equality and hashing consider only the neighbourhood and the rule, so
/// two species differing only in glyphs are the same species.
#[derive(Clone, Debug)]
pub struct Species<O> {
    /// Glyph for display.
    pub glyph: char,
    /// ASCII glyph used in seed files and debug output.
    pub debug_glyph: char,
    neighbourhood: Neighbourhood<O>,
    rule: RuleTable,
}

impl<O: Copy> Species<O> {
    /// Build a species, checking the rule fits the neighbourhood.
    pub fn new(
        glyph: char,
        debug_glyph: char,
        neighbourhood: Neighbourhood<O>,
        rule: RuleTable,
    ) -> Result<Self, ConfigError> {
        check_rule(&rule, neighbourhood.len())?;
        Ok(Self {
            glyph,
            debug_glyph,
            neighbourhood,
            rule,
        })
    }

    /// Offsets sampled by cells of this species.
    pub fn neighbourhood(&self) -> &Neighbourhood<O> {
        &self.neighbourhood
    }

    /// The rule cells of this species obey.
    pub fn rule(&self) -> &RuleTable {
        &self.rule
    }
}

impl<O: PartialEq> PartialEq for Species<O> {
    fn eq(&self, other: &Self) -> bool {
        self.neighbourhood == other.neighbourhood && self.rule == other.rule
    }
}

impl<O: Eq> Eq for Species<O> {}

impl<O: Hash> Hash for Species<O> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.neighbourhood.hash(state);
        self.rule.hash(state);
    }
}

/// Species known to a simulation, addressed by [`SpeciesId`].
///
/// Registration interns: registering a species equal to one already held
/// returns the existing id and keeps the existing glyphs.
#[derive(Clone, Debug)]
pub struct SpeciesRegistry<O> {
    species: Vec<Species<O>>,
}

impl<O> Default for SpeciesRegistry<O> {
    fn default() -> Self {
        Self {
            species: Vec::new(),
        }
    }
}

impl<O: Copy + PartialEq> SpeciesRegistry<O> {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a species, or find the equal one already registered.
    pub fn register(&mut self, species: Species<O>) -> SpeciesId {
        if let Some(i) = self.species.iter().position(|s| *s == species) {
            return SpeciesId(i as u32);
        }
        self.species.push(species);
        SpeciesId((self.species.len() - 1) as u32)
    }

    /// The species behind `id`.
    pub fn get(&self, id: SpeciesId) -> Option<&Species<O>> {
        self.species.get(id.index())
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: SpeciesId) -> bool {
        id.index() < self.species.len()
    }

    /// Number of distinct species.
    pub fn len(&self) -> usize {
        self.species.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Ids and species in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (SpeciesId, &Species<O>)> {
        self.species
            .iter()
            .enumerate()
            .map(|(i, s)| (SpeciesId(i as u32), s))
    }

    /// The species whose debug glyph is `glyph`.
    pub fn by_debug_glyph(&self, glyph: char) -> Option<SpeciesId> {
        self.iter()
            .find(|(_, s)| s.debug_glyph == glyph)
            .map(|(id, _)| id)
    }

    /// Debug glyphs indexed by species id.
    pub fn debug_glyphs(&self) -> Vec<char> {
        self.species.iter().map(|s| s.debug_glyph).collect()
    }

    /// Display glyphs indexed by species id.
    pub fn glyphs(&self) -> Vec<char> {
        self.species.iter().map(|s| s.glyph).collect()
    }
}

impl SpeciesRegistry<i32> {
    /// The three built-in 1D species. All obey
    /// [`presets::species_default`] and differ in reach: `1` looks one
    /// cell to either side, `2` two cells, `3` three cells.
    pub fn triad() -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for (glyph, debug_glyph, d) in [('\u{1}', '1', 1), ('\u{46C}', '2', 2), ('\u{58D}', '3', 3)] {
            let neighbourhood = Neighbourhood1D::pair(d)?;
            registry.register(Species::new(
                glyph,
                debug_glyph,
                neighbourhood,
                presets::species_default(),
            )?);
        }
        Ok(registry)
    }

    /// A line of `len` cells, each of a uniformly chosen species and alive
    /// with probability `density`.
    pub fn random_line<R: Rng + ?Sized>(
        &self,
        len: usize,
        density: f64,
        rng: &mut R,
    ) -> Result<Grid1D, ConfigError> {
        if self.is_empty() {
            return Err(ConfigError::EmptyRegistry);
        }
        // Validates length and density before drawing species.
        let mut grid = Grid1D::random(len, density, rng)?;
        let count = self.len() as u32;
        for i in 0..len {
            let alive = grid.get(i).is_some_and(|c| c.alive);
            let species = SpeciesId(rng.gen_range(0..count));
            grid.set(i, Cell::with_species(alive, species))?;
        }
        Ok(grid)
    }
}
