//! Rule construction errors.

use cellum_space::SpaceError;
use std::error::Error;
use std::fmt;

/// Errors raised while building a rule table.
///
/// Every variant is a configuration problem detected at construction
/// time; a rule that builds successfully never fails mid-simulation.
#[derive(Clone, Debug, PartialEq)]
pub enum RuleError {
    /// A ruleset token with an unrecognised prefix.
    UnknownToken {
        /// The offending token.
        token: String,
    },
    /// One of the mandatory leading `R`, `C`, `M` tokens is missing or
    /// out of order.
    MissingField {
        /// The expected prefix.
        expected: char,
        /// What was found in its place (empty if the string ended).
        found: String,
    },
    /// A token whose value is not a non-negative integer.
    InvalidValue {
        /// The offending token.
        token: String,
    },
    /// The `M` flag is neither 0 nor 1.
    InvalidMiddleFlag {
        /// The rejected value.
        value: u32,
    },
    /// Whitespace inside a ruleset string.
    EmbeddedWhitespace,
    /// Radius above the supported maximum.
    RadiusOutOfRange {
        /// The requested radius.
        radius: u32,
        /// The largest accepted radius.
        max: u32,
    },
    /// A survive / born count larger than the neighbourhood.
    CountOutOfRange {
        /// The requested count.
        count: usize,
        /// Neighbourhood size.
        max: usize,
    },
    /// Wolfram rules need an odd neighbourhood width.
    EvenWidth {
        /// The rejected width.
        width: u32,
    },
    /// Pattern width outside the supported range.
    WidthOutOfRange {
        /// The rejected width.
        width: u32,
        /// The largest accepted width.
        max: u32,
    },
    /// Wolfram code larger than `2^(2^width) - 1`.
    CodeOutOfRange {
        /// The rejected code.
        code: u128,
        /// The largest code for this width.
        max: u128,
    },
    /// A pattern key that does not fit the table width, or a state tuple
    /// of the wrong length.
    PatternOutOfRange {
        /// Number of states supplied, or the packed key.
        pattern: u64,
        /// Table width.
        width: usize,
    },
    /// A table whose arity does not fit the neighbourhood it is paired with.
    ArityMismatch {
        /// Neighbourhood size.
        neighbourhood: usize,
        /// What the table needs.
        table: usize,
    },
    /// The ruleset describes an empty neighbourhood (`R0,M0`).
    EmptyNeighbourhood,
    /// Building the neighbourhood failed.
    Space(SpaceError),
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownToken { token } => write!(f, "unknown ruleset token {token:?}"),
            Self::MissingField { expected, found } => {
                write!(f, "expected {expected}<int> token, found {found:?}")
            }
            Self::InvalidValue { token } => {
                write!(f, "token {token:?} does not carry a non-negative integer")
            }
            Self::InvalidMiddleFlag { value } => {
                write!(f, "middle flag must be 0 or 1, got {value}")
            }
            Self::EmbeddedWhitespace => write!(f, "ruleset string contains whitespace"),
            Self::RadiusOutOfRange { radius, max } => {
                write!(f, "radius {radius} exceeds maximum {max}")
            }
            Self::CountOutOfRange { count, max } => {
                write!(f, "count {count} exceeds neighbourhood size {max}")
            }
            Self::EvenWidth { width } => {
                write!(f, "Wolfram rules need an odd width, got {width}")
            }
            Self::WidthOutOfRange { width, max } => {
                write!(f, "pattern width {width} outside [1, {max}]")
            }
            Self::CodeOutOfRange { code, max } => {
                write!(f, "rule code {code} exceeds maximum {max}")
            }
            Self::PatternOutOfRange { pattern, width } => {
                write!(f, "pattern {pattern} does not fit a {width}-wide table")
            }
            Self::ArityMismatch {
                neighbourhood,
                table,
            } => write!(
                f,
                "rule table needs {table} neighbours, neighbourhood has {neighbourhood}"
            ),
            Self::EmptyNeighbourhood => write!(f, "ruleset describes an empty neighbourhood"),
            Self::Space(e) => write!(f, "neighbourhood: {e}"),
        }
    }
}

impl Error for RuleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for RuleError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}
