use log::trace;

use crate::matrix::Matrix;
use crate::ring::{compute_ring, ring_count, Coord, Ring};
use crate::util::rotate90;

/// How a quarter turn is carried out. Both rotate clockwise and in place.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[clap(rename_all = "kebab_case")]
pub enum Strategy {
    /// Cycle the four cells of every quartet, ring by ring.
    #[default]
    Rings,
    /// Reverse the row order, then transpose.
    Transpose,
}

impl Strategy {
    pub fn apply<T: Copy>(self, matrix: &mut Matrix<T>) {
        match self {
            Strategy::Rings => {
                rotate(matrix);
            }
            Strategy::Transpose => rotate90(matrix.rows_mut()),
        }
    }
}

/// Moves `a -> b -> c -> d -> a` through a single scratch value.
pub fn rotate_quartet<T: Copy>(matrix: &mut Matrix<T>, [a, b, c, d]: [Coord; 4]) {
    let scratch = matrix[d];
    matrix[d] = matrix[c];
    matrix[c] = matrix[b];
    matrix[b] = matrix[a];
    matrix[a] = scratch;
}

/// Turns one ring a quarter clockwise. Quartets are disjoint, so their order doesn't matter.
pub fn rotate_ring<T: Copy>(matrix: &mut Matrix<T>, ring: &Ring) {
    for quartet in ring.quartets() {
        rotate_quartet(matrix, quartet);
    }
}

/// Rotates the matrix 90 degrees clockwise in place, outermost ring first.
pub fn rotate<T: Copy>(matrix: &mut Matrix<T>) -> &mut Matrix<T> {
    let dim = matrix.dim();
    for cycle in 0..ring_count(dim) {
        let ring = compute_ring(dim, cycle);
        trace!("Rotating ring {cycle} of {dim}x{dim}, {ring}");
        rotate_ring(matrix, &ring);
    }
    matrix
}

/// Applies `turns` clockwise quarter turns; only `turns % 4` of them are performed.
pub fn rotate_turns<T: Copy>(matrix: &mut Matrix<T>, turns: usize, strategy: Strategy) -> &mut Matrix<T> {
    for _ in 0..turns % 4 {
        strategy.apply(matrix);
    }
    matrix
}
