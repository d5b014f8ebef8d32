//! Cellum: a cellular automaton engine.
//!
//! This is the facade crate that re-exports the public API of the Cellum
//! sub-crates. Most users only need this one dependency.
//!
//! # Quick start
//!
//! ```rust
//! use cellum::prelude::*;
//!
//! // Rule 90 from a single living cell, rendered with `-` and `X`.
//! let rule = Automaton::wolfram(90, 3, BoundaryPolicy::Wrap).unwrap();
//! let config = RunnerConfig { max_generations: Some(3) };
//! let mut runner = SimulationRunner::new(Grid1D::point(9).unwrap(), rule, config).unwrap();
//!
//! let mut sink = TextSink::new(Vec::new()).with_glyphs('-', 'X');
//! let report = runner.run(&mut sink).unwrap();
//! assert_eq!(report.state, RunState::Exhausted);
//!
//! let text = String::from_utf8(sink.into_inner()).unwrap();
//! assert_eq!(text, "----X----\n---X-X---\n--X---X--\n-X-X-X-X-\n");
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cellum-core` | Cells, ids, rule outcomes |
//! | [`space`] | `cellum-space` | Grids, boundaries, neighbourhoods, seed text |
//! | [`rule`] | `cellum-rule` | Rule tables, Wolfram codes, rulestrings, presets |
//! | [`engine`] | `cellum-engine` | Transitions, species, the runner and sinks |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Cells, species and generation ids, rule outcomes (`cellum-core`).
pub use cellum_core as types;

/// Grids and neighbour resolution (`cellum-space`).
///
/// [`space::Grid1D`] and [`space::Grid2D`] implement [`space::Lattice`];
/// [`space::seed`] reads and writes line-based seed text.
pub use cellum_space as space;

/// Rule tables and rule constructors (`cellum-rule`).
///
/// Wolfram codes via [`rule::wolfram`], rulestrings via
/// [`rule::RuleString`], and named rules in [`rule::presets`].
pub use cellum_rule as rule;

/// Advancing and running simulations (`cellum-engine`).
///
/// [`engine::SimulationRunner`] drives a [`engine::Transition`] until the
/// grid repeats.
pub use cellum_engine as engine;

/// Common imports for typical Cellum usage.
///
/// ```rust
/// use cellum::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use cellum_core::{Cell, GenerationId, Outcome, SpeciesId};

    // Space
    pub use cellum_space::{
        BoundaryPolicy, Grid1D, Grid2D, Lattice, Neighbourhood1D, Neighbourhood2D, SpaceError,
    };

    // Rules
    pub use cellum_rule::{AggregateCountTable, ExactPatternTable, Rule, RuleError, RuleString, RuleTable};

    // Engine
    pub use cellum_engine::{
        advance, advance_by, Automaton, CancelToken, CollectSink, ConfigError, GenerationSink,
        NullSink, RunReport, RunState, RunnerConfig, SimulationRunner, Species, SpeciesAutomaton,
        SpeciesRegistry, StepError, TextSink, Transition,
    };
}
