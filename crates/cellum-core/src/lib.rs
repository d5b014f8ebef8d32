//! Core types for the Cellum cellular automaton engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the value types every other crate in the workspace passes around:
//! cells, identifiers and the tri-state rule [`Outcome`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod id;
pub mod outcome;

pub use cell::{Cell, NeighbourStates};
pub use id::{GenerationId, SpeciesId};
pub use outcome::Outcome;
