//! Exact-pattern and aggregate-count rule tables.

use crate::error::RuleError;
use cellum_core::Outcome;
use std::collections::BTreeMap;
use std::fmt;

/// The capability shared by every rule table: map the ordered alive-states
/// of a cell's neighbours to an [`Outcome`].
pub trait Rule {
    /// Outcome for the given neighbour states.
    fn outcome(&self, neighbours: &[bool]) -> Outcome;

    /// Next alive-state of a cell currently `current`.
    fn evaluate(&self, neighbours: &[bool], current: bool) -> bool {
        self.outcome(neighbours).apply(current)
    }
}

/// Rule keyed by the exact ordered tuple of neighbour states.
///
/// Patterns are packed into a `u64`, first neighbour in the most
/// significant position, so `[true, false, false]` is `0b100`. A pattern
/// not present in the table, or stored as `false`, means the cell dies.
///
/// ```
/// use cellum_rule::{ExactPatternTable, Rule};
///
/// let mut t = ExactPatternTable::new(3).unwrap();
/// t.insert(&[true, false, false], true).unwrap();
/// assert!(t.evaluate(&[true, false, false], false));
/// assert!(!t.evaluate(&[false, false, true], true));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExactPatternTable {
    width: usize,
    patterns: BTreeMap<u64, bool>,
}

impl ExactPatternTable {
    /// Widest pattern a table can hold.
    pub const MAX_WIDTH: usize = 64;

    /// An empty table for patterns of `width` neighbours.
    pub fn new(width: usize) -> Result<Self, RuleError> {
        if width == 0 || width > Self::MAX_WIDTH {
            return Err(RuleError::WidthOutOfRange {
                width: width.min(u32::MAX as usize) as u32,
                max: Self::MAX_WIDTH as u32,
            });
        }
        Ok(Self {
            width,
            patterns: BTreeMap::new(),
        })
    }

    /// Pack neighbour states into a key, first state most significant.
    pub fn pack(states: &[bool]) -> u64 {
        states
            .iter()
            .fold(0u64, |acc, &alive| (acc << 1) | u64::from(alive))
    }

    /// Store the outcome for an ordered state tuple.
    pub fn insert(&mut self, states: &[bool], alive: bool) -> Result<(), RuleError> {
        if states.len() != self.width {
            return Err(RuleError::PatternOutOfRange {
                pattern: states.len() as u64,
                width: self.width,
            });
        }
        self.patterns.insert(Self::pack(states), alive);
        Ok(())
    }

    /// Store the outcome for an already packed key.
    pub fn insert_packed(&mut self, pattern: u64, alive: bool) -> Result<(), RuleError> {
        if self.width < 64 && pattern >> self.width != 0 {
            return Err(RuleError::PatternOutOfRange {
                pattern,
                width: self.width,
            });
        }
        self.patterns.insert(pattern, alive);
        Ok(())
    }

    /// Whether the pattern leads to a living cell.
    pub fn lookup(&self, states: &[bool]) -> bool {
        states.len() == self.width
            && self
                .patterns
                .get(&Self::pack(states))
                .copied()
                .unwrap_or(false)
    }

    /// Number of neighbours per pattern.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of stored patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when no pattern is stored.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Packed keys of every pattern that leads to a living cell, ascending.
    pub fn live_patterns(&self) -> impl Iterator<Item = u64> + '_ {
        self.patterns
            .iter()
            .filter(|&(_, &alive)| alive)
            .map(|(&pattern, _)| pattern)
    }
}

impl Rule for ExactPatternTable {
    fn outcome(&self, neighbours: &[bool]) -> Outcome {
        Outcome::from(self.lookup(neighbours))
    }
}

/// Rule keyed by the number of living neighbours.
///
/// Counts absent from the table mean the cell dies.
///
/// ```
/// use cellum_core::Outcome;
/// use cellum_rule::{AggregateCountTable, Rule};
///
/// let life = AggregateCountTable::new()
///     .with(2, Outcome::Unchanged)
///     .with(3, Outcome::Live);
/// assert!(life.evaluate(&[true, true, false], true));
/// assert!(!life.evaluate(&[true, true, false], false));
/// assert!(life.evaluate(&[true, true, true], false));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AggregateCountTable {
    outcomes: BTreeMap<usize, Outcome>,
}

impl AggregateCountTable {
    /// An empty table. Every count maps to [`Outcome::Die`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, count: usize, outcome: Outcome) -> Self {
        self.set(count, outcome);
        self
    }

    /// Set the outcome for `count` living neighbours, replacing any
    /// earlier entry.
    pub fn set(&mut self, count: usize, outcome: Outcome) {
        self.outcomes.insert(count, outcome);
    }

    /// Outcome for `count` living neighbours.
    pub fn get(&self, count: usize) -> Outcome {
        self.outcomes.get(&count).copied().unwrap_or_default()
    }

    /// Stored `(count, outcome)` entries, ascending by count.
    pub fn entries(&self) -> impl Iterator<Item = (usize, Outcome)> + '_ {
        self.outcomes.iter().map(|(&c, &o)| (c, o))
    }

    /// Highest count with an entry.
    pub fn max_count(&self) -> Option<usize> {
        self.outcomes.keys().next_back().copied()
    }

    /// True when no count is stored.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl Rule for AggregateCountTable {
    fn outcome(&self, neighbours: &[bool]) -> Outcome {
        self.get(neighbours.iter().filter(|&&alive| alive).count())
    }
}

/// A rule table of either shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RuleTable {
    /// Keyed by the ordered neighbour states.
    Exact(ExactPatternTable),
    /// Keyed by the number of living neighbours.
    Aggregate(AggregateCountTable),
}

impl RuleTable {
    /// True when the table holds no entries at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Exact(t) => t.is_empty(),
            Self::Aggregate(t) => t.is_empty(),
        }
    }

    /// Neighbourhood size the table expects: the pattern width for exact
    /// tables, the highest stored count for aggregate ones.
    pub fn arity(&self) -> usize {
        match self {
            Self::Exact(t) => t.width(),
            Self::Aggregate(t) => t.max_count().unwrap_or(0),
        }
    }

    /// Check the table can be paired with a neighbourhood of `len` offsets.
    ///
    /// Exact tables need exactly their width; aggregate tables may not hold
    /// counts the neighbourhood can never reach.
    pub fn check_arity(&self, len: usize) -> Result<(), RuleError> {
        let fits = match self {
            Self::Exact(t) => t.width() == len,
            Self::Aggregate(_) => self.arity() <= len,
        };
        if fits {
            Ok(())
        } else {
            Err(RuleError::ArityMismatch {
                neighbourhood: len,
                table: self.arity(),
            })
        }
    }
}

impl Rule for RuleTable {
    #[inline]
    fn outcome(&self, neighbours: &[bool]) -> Outcome {
        match self {
            Self::Exact(t) => t.outcome(neighbours),
            Self::Aggregate(t) => t.outcome(neighbours),
        }
    }
}

impl From<ExactPatternTable> for RuleTable {
    fn from(t: ExactPatternTable) -> Self {
        Self::Exact(t)
    }
}

impl From<AggregateCountTable> for RuleTable {
    fn from(t: AggregateCountTable) -> Self {
        Self::Aggregate(t)
    }
}

impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(t) => write!(
                f,
                "exact, width {}, {} live of {} stored patterns",
                t.width(),
                t.live_patterns().count(),
                t.len()
            ),
            Self::Aggregate(t) => {
                let mut first = true;
                write!(f, "aggregate {{")?;
                for (count, outcome) in t.entries() {
                    if !first {
                        write!(f, ", ")?;
                    }
                    first = false;
                    write!(f, "{count}: {outcome}")?;
                }
                write!(f, "}}")
            }
        }
    }
}
