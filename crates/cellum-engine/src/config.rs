//! Automaton and runner configuration.
//!
//! Configuration is validated once, at construction. Nothing that passes
//! validation can fail later for a configuration reason.

use std::error::Error;
use std::fmt;

use cellum_core::SpeciesId;
use cellum_rule::{presets, RuleError, RuleString, RuleTable};
use cellum_space::{BoundaryPolicy, Neighbourhood, Neighbourhood1D, Neighbourhood2D, SpaceError};

use crate::mutation::Mutation;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while building an automaton or a runner.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The grid has zero cells.
    EmptyGrid,
    /// The rule table holds no entries.
    EmptyRuleTable,
    /// The rule table does not fit the neighbourhood.
    ArityMismatch {
        /// Neighbourhood size.
        neighbourhood: usize,
        /// What the table needs.
        table: usize,
    },
    /// Multi-species mode with no species registered.
    EmptyRegistry,
    /// A seed cell carries no species in multi-species mode.
    MissingSpecies {
        /// Flat index of the cell.
        index: usize,
    },
    /// A seed cell names a species the registry does not hold.
    UnknownSpecies {
        /// The unregistered id.
        species: SpeciesId,
    },
    /// `max_generations` is `Some(0)`.
    ZeroGenerationLimit,
    /// Mutation probability outside `[0, 1)`.
    InvalidMutation {
        /// The rejected probability.
        probability: f64,
    },
    /// Mutation perturbs neighbour counts, so it needs a count rule.
    MutationNeedsCountRule,
    /// Rule construction failed.
    Rule(RuleError),
    /// Grid or neighbourhood construction failed.
    Space(SpaceError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid has zero cells"),
            Self::EmptyRuleTable => write!(f, "rule table is empty"),
            Self::ArityMismatch {
                neighbourhood,
                table,
            } => write!(
                f,
                "rule table needs {table} neighbours, neighbourhood has {neighbourhood}"
            ),
            Self::EmptyRegistry => write!(f, "no species registered"),
            Self::MissingSpecies { index } => write!(f, "seed cell {index} has no species"),
            Self::UnknownSpecies { species } => {
                write!(f, "seed names unregistered species {species}")
            }
            Self::ZeroGenerationLimit => write!(f, "max_generations must be at least 1"),
            Self::InvalidMutation { probability } => {
                write!(f, "mutation probability {probability} is outside [0, 1)")
            }
            Self::MutationNeedsCountRule => {
                write!(f, "mutation requires an aggregate-count rule")
            }
            Self::Rule(e) => write!(f, "rule: {e}"),
            Self::Space(e) => write!(f, "space: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rule(e) => Some(e),
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RuleError> for ConfigError {
    fn from(e: RuleError) -> Self {
        match e {
            RuleError::ArityMismatch {
                neighbourhood,
                table,
            } => Self::ArityMismatch {
                neighbourhood,
                table,
            },
            other => Self::Rule(other),
        }
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        match e {
            SpaceError::EmptySpace => Self::EmptyGrid,
            other => Self::Space(other),
        }
    }
}

/// Check a rule table can drive a neighbourhood of `len` offsets.
pub(crate) fn check_rule(rule: &RuleTable, len: usize) -> Result<(), ConfigError> {
    if rule.is_empty() {
        return Err(ConfigError::EmptyRuleTable);
    }
    rule.check_arity(len)?;
    Ok(())
}

// ── Automaton ──────────────────────────────────────────────────────

/// A uniform automaton: one neighbourhood and one rule for every cell.
///
/// `O` is the lattice's offset type, so `Automaton<i32>` drives a
/// [`Grid1D`](cellum_space::Grid1D) and `Automaton<(i32, i32)>` a
/// [`Grid2D`](cellum_space::Grid2D).
///
/// An optional [`Mutation`] perturbs each cell's live-neighbour count
/// before an aggregate rule is looked up.
#[derive(Clone, Debug, PartialEq)]
pub struct Automaton<O> {
    pub(crate) neighbourhood: Neighbourhood<O>,
    pub(crate) rule: RuleTable,
    pub(crate) boundary: BoundaryPolicy,
    pub(crate) mutation: Option<Mutation>,
}

impl<O: Copy> Automaton<O> {
    /// Pair a neighbourhood with a rule and validate the pairing.
    pub fn new(
        neighbourhood: Neighbourhood<O>,
        rule: RuleTable,
        boundary: BoundaryPolicy,
    ) -> Result<Self, ConfigError> {
        let automaton = Self {
            neighbourhood,
            rule,
            boundary,
            mutation: None,
        };
        automaton.validate()?;
        Ok(automaton)
    }

    /// Perturb neighbour counts with probability `probability`, drawing
    /// from an RNG seeded with `seed`.
    ///
    /// A probability of zero leaves the automaton unperturbed.
    pub fn with_mutation(mut self, probability: f64, seed: u64) -> Result<Self, ConfigError> {
        let mutation = Mutation::new(probability, seed)?;
        self.mutation = (probability > 0.0).then_some(mutation);
        self.validate()?;
        Ok(self)
    }

    /// Check the rule is non-empty, fits the neighbourhood, and is a count
    /// rule when mutation is enabled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_rule(&self.rule, self.neighbourhood.len())?;
        if self.mutation.is_some() && !matches!(self.rule, RuleTable::Aggregate(_)) {
            return Err(ConfigError::MutationNeedsCountRule);
        }
        Ok(())
    }

    /// Neighbour-count noise, if enabled.
    pub fn mutation(&self) -> Option<&Mutation> {
        self.mutation.as_ref()
    }

    /// Sampled offsets.
    pub fn neighbourhood(&self) -> &Neighbourhood<O> {
        &self.neighbourhood
    }

    /// The rule table.
    pub fn rule(&self) -> &RuleTable {
        &self.rule
    }

    /// How out-of-range neighbours are mapped back onto the grid.
    pub fn boundary(&self) -> BoundaryPolicy {
        self.boundary
    }
}

impl Automaton<i32> {
    /// A 1D aggregate automaton from a ruleset string.
    pub fn from_rulestring(
        ruleset: &RuleString,
        boundary: BoundaryPolicy,
    ) -> Result<Self, ConfigError> {
        let (neighbourhood, rule) = ruleset.build()?;
        Self::new(neighbourhood, rule, boundary)
    }

    /// A 1D exact automaton from a Wolfram code.
    pub fn wolfram(code: u128, width: u32, boundary: BoundaryPolicy) -> Result<Self, ConfigError> {
        let (neighbourhood, rule): (Neighbourhood1D, _) = cellum_rule::wolfram(code, width)?;
        Self::new(neighbourhood, rule, boundary)
    }
}

impl Automaton<(i32, i32)> {
    /// Conway's Game of Life as a count rule over the Moore neighbourhood.
    pub fn game_of_life(boundary: BoundaryPolicy) -> Result<Self, ConfigError> {
        let (neighbourhood, rule): (Neighbourhood2D, _) = presets::game_of_life();
        Self::new(neighbourhood, rule, boundary)
    }

    /// Conway's Game of Life as a 512-pattern exact table.
    pub fn game_of_life_exact(boundary: BoundaryPolicy) -> Result<Self, ConfigError> {
        let (neighbourhood, rule) = presets::game_of_life_exact()?;
        Self::new(neighbourhood, rule, boundary)
    }
}

// ── RunnerConfig ───────────────────────────────────────────────────

/// Options for a [`SimulationRunner`](crate::SimulationRunner).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Stop with [`RunState::Exhausted`](crate::RunState::Exhausted) after
    /// this many new generations. `None` runs until a repeat or a cancel.
    pub max_generations: Option<u64>,
}

impl RunnerConfig {
    /// Validate the options.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_generations == Some(0) {
            return Err(ConfigError::ZeroGenerationLimit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellum_core::Outcome;
    use cellum_rule::{AggregateCountTable, ExactPatternTable};

    #[test]
    fn empty_rule_is_rejected() {
        let rule = RuleTable::from(AggregateCountTable::new());
        let err = Automaton::new(Neighbourhood1D::radius(1, false).unwrap(), rule, BoundaryPolicy::Wrap)
            .unwrap_err();
        assert_eq!(err, ConfigError::EmptyRuleTable);
    }

    #[test]
    fn exact_width_must_match() {
        let mut table = ExactPatternTable::new(3).unwrap();
        table.insert(&[true, true, true], true).unwrap();
        let err = Automaton::new(
            Neighbourhood1D::radius(2, true).unwrap(),
            table.into(),
            BoundaryPolicy::Wrap,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::ArityMismatch {
                neighbourhood: 5,
                table: 3
            }
        );
    }

    #[test]
    fn aggregate_count_above_neighbourhood_is_rejected() {
        let rule = RuleTable::from(AggregateCountTable::new().with(3, Outcome::Live));
        assert!(matches!(
            Automaton::new(Neighbourhood1D::pair(1).unwrap(), rule, BoundaryPolicy::Clip),
            Err(ConfigError::ArityMismatch { .. })
        ));
    }

    #[test]
    fn constructors() {
        let rs: RuleString = "R2,C0,M1,S1,B3".parse().unwrap();
        let a = Automaton::from_rulestring(&rs, BoundaryPolicy::Wrap).unwrap();
        assert_eq!(a.neighbourhood().len(), 5);
        assert_eq!(a.boundary(), BoundaryPolicy::Wrap);

        let w = Automaton::wolfram(110, 3, BoundaryPolicy::Clip).unwrap();
        assert_eq!(w.neighbourhood().offsets(), &[-1, 0, 1]);
        assert!(matches!(
            Automaton::wolfram(110, 4, BoundaryPolicy::Clip),
            Err(ConfigError::Rule(RuleError::EvenWidth { width: 4 }))
        ));

        assert!(Automaton::game_of_life(BoundaryPolicy::Wrap).is_ok());
        assert!(Automaton::game_of_life_exact(BoundaryPolicy::Wrap).is_ok());
    }

    #[test]
    fn mutation_configuration() {
        let rs: RuleString = "R1,C0,M0,S1,B2".parse().unwrap();
        let plain = Automaton::from_rulestring(&rs, BoundaryPolicy::Wrap).unwrap();
        let off = plain.clone().with_mutation(0.0, 7).unwrap();
        assert!(off.mutation().is_none());
        assert_eq!(off, plain);

        let on = plain.clone().with_mutation(0.25, 7).unwrap();
        assert_eq!(on.mutation().map(|m| m.probability()), Some(0.25));

        assert_eq!(
            plain.with_mutation(1.0, 7).unwrap_err(),
            ConfigError::InvalidMutation { probability: 1.0 }
        );
        let w = Automaton::wolfram(30, 3, BoundaryPolicy::Wrap).unwrap();
        assert_eq!(
            w.with_mutation(0.1, 0).unwrap_err(),
            ConfigError::MutationNeedsCountRule
        );
    }

    #[test]
    fn runner_config_validation() {
        assert!(RunnerConfig::default().validate().is_ok());
        assert_eq!(
            RunnerConfig {
                max_generations: Some(0)
            }
            .validate(),
            Err(ConfigError::ZeroGenerationLimit)
        );
    }

    #[test]
    fn empty_space_maps_to_empty_grid() {
        assert_eq!(ConfigError::from(SpaceError::EmptySpace), ConfigError::EmptyGrid);
    }
}
