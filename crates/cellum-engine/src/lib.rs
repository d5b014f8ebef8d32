//! Generation advance and run control for Cellum simulations.
//!
//! The engine maps a grid, a boundary policy, a neighbourhood and a rule
//! table to the next generation, and drives repeated advances until the
//! grid repeats.
//!
//! - [`Automaton`] / [`SpeciesAutomaton`]: the two [`Transition`]s
//! - [`advance`] / [`advance_by`]: one-shot advances into fresh grids
//! - [`SimulationRunner`]: double-buffered run loop with exact repeat
//!   detection, cancellation and a generation limit
//! - [`GenerationSink`]: where each new generation goes
//! - [`Mutation`]: optional noise on live-neighbour counts
//!
//! # Features
//!
//! - `parallel`: evaluate uniform-rule cells with rayon. Species mode and
//!   mutated count rules stay sequential so seeded runs are reproducible.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod advance;
pub mod cancel;
pub mod config;
pub mod error;
pub mod hash;
pub mod mutation;
pub mod runner;
pub mod sink;
pub mod species;

pub use advance::{advance, advance_by, Advance, SpeciesAutomaton, Transition};
pub use cancel::CancelToken;
pub use config::{Automaton, ConfigError, RunnerConfig};
pub use error::{RunError, StepError};
pub use hash::{grid_digest, StateKey};
pub use mutation::Mutation;
pub use runner::{RunReport, RunState, SimulationRunner};
pub use sink::{CollectSink, GenerationSink, NullSink, TextSink};
pub use species::{Species, SpeciesRegistry};
