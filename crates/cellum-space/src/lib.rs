//! Spatial structures for Cellum simulations.
//!
//! This crate defines the [`Lattice`] trait, the abstraction through which
//! the engine reads prior generations and resolves neighbours, along with
//! the two concrete grids and the pieces that shape neighbour lookups.
//!
//! # Backends
//!
//! - [`Grid1D`]: a line of cells, addressed by a single index
//! - [`Grid2D`]: a row-major grid of cells, addressed by `(row, col)`
//!
//! # Neighbour resolution
//!
//! A [`Neighbourhood`] lists relative offsets; a [`BoundaryPolicy`] maps
//! each `position + offset` back into the grid (wrapping or clipping).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod error;
pub mod grid2d;
pub mod lattice;
pub mod line1d;
pub mod neighbourhood;
pub mod seed;

#[cfg(test)]
pub(crate) mod compliance;

pub use boundary::BoundaryPolicy;
pub use error::SpaceError;
pub use grid2d::Grid2D;
pub use lattice::Lattice;
pub use line1d::Grid1D;
pub use neighbourhood::{Neighbourhood, Neighbourhood1D, Neighbourhood2D};
