//! Lattice trait compliance test helpers.
//!
//! These functions verify that a Lattice implementation satisfies the
//! invariants the engine relies on. Reused by the Grid1D and Grid2D test
//! modules.

use crate::boundary::BoundaryPolicy;
use crate::lattice::Lattice;
use indexmap::IndexSet;

/// Assert that `rows * cols == cell_count` and the cell slice agrees.
pub fn assert_shape_consistent<L: Lattice>(lattice: &L) {
    let (rows, cols) = lattice.shape();
    assert_eq!(
        rows * cols,
        lattice.cell_count(),
        "shape {rows}x{cols} disagrees with cell_count {}",
        lattice.cell_count()
    );
    assert_eq!(lattice.cells().len(), lattice.cell_count());
}

/// Assert that every resolved neighbour index is in `[0, cell_count)`.
pub fn assert_neighbours_in_range<L: Lattice>(lattice: &L, offsets: &[L::Offset]) {
    for policy in [BoundaryPolicy::Wrap, BoundaryPolicy::Clip] {
        for index in 0..lattice.cell_count() {
            for &offset in offsets {
                let n = lattice
                    .neighbour_index(index, offset, policy)
                    .expect("resolution should succeed on a non-empty lattice");
                assert!(
                    n < lattice.cell_count(),
                    "{policy}: neighbour {offset:?} of {index} resolved to {n}"
                );
            }
        }
    }
}

/// Assert that under Wrap each offset is a permutation of the cells:
/// no two cells share the same neighbour at the same offset.
pub fn assert_wrap_is_permutation<L: Lattice>(lattice: &L, offsets: &[L::Offset]) {
    for &offset in offsets {
        let targets: IndexSet<usize> = (0..lattice.cell_count())
            .map(|i| {
                lattice
                    .neighbour_index(i, offset, BoundaryPolicy::Wrap)
                    .expect("wrap resolution should succeed")
            })
            .collect();
        assert_eq!(
            targets.len(),
            lattice.cell_count(),
            "wrap offset {offset:?} maps two cells onto one neighbour"
        );
    }
}

/// Assert that two resolution passes agree.
pub fn assert_resolution_deterministic<L: Lattice>(lattice: &L, offsets: &[L::Offset]) {
    for policy in [BoundaryPolicy::Wrap, BoundaryPolicy::Clip] {
        for index in 0..lattice.cell_count() {
            for &offset in offsets {
                assert_eq!(
                    lattice.neighbour_index(index, offset, policy),
                    lattice.neighbour_index(index, offset, policy)
                );
            }
        }
    }
}

/// Run all compliance checks on a lattice with the given offsets.
pub fn run_full_compliance<L: Lattice>(lattice: &L, offsets: &[L::Offset]) {
    assert_shape_consistent(lattice);
    assert_neighbours_in_range(lattice, offsets);
    assert_wrap_is_permutation(lattice, offsets);
    assert_resolution_deterministic(lattice, offsets);
}
