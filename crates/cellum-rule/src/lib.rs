//! Rule tables for Cellum simulations.
//!
//! A rule decides a cell's next state from the states of its neighbours.
//! Two table shapes are supported behind the [`Rule`] capability:
//!
//! - [`ExactPatternTable`]: keyed by the ordered tuple of neighbour states
//!   (Wolfram elementary rules, pattern-exact Game of Life)
//! - [`AggregateCountTable`]: keyed by the number of living neighbours, with
//!   a die / live / unchanged outcome (Life-like and 1D totalistic rules)
//!
//! Tables are built directly, from a Wolfram code ([`wolfram()`]), from a
//! compact ruleset string ([`RuleString`]), or from the named [`presets`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod presets;
pub mod rulestring;
pub mod table;
pub mod wolfram;

pub use error::RuleError;
pub use rulestring::RuleString;
pub use table::{AggregateCountTable, ExactPatternTable, Rule, RuleTable};
pub use wolfram::{elementary, wolfram};
