use std::fmt::{Display, Formatter};

use itertools::Itertools;

/// `(row, col)` position inside a matrix.
pub type Coord = (usize, usize);

/// The border cells of one concentric square, traced clockwise from the
/// ring's top-left corner.
///
/// `cells` always holds `4 * size` coordinates. For `i < size` the cells
/// `i`, `i + size`, `i + 2 * size` and `i + 3 * size` lie on the top, right,
/// bottom and left edge at the same offset and form one quartet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ring {
    pub cells: Vec<Coord>,
    pub size: usize,
}

impl Ring {
    pub fn quartets(&self) -> impl Iterator<Item = [Coord; 4]> + '_ {
        let n = self.size;
        (0..n).map(move |i| [self.cells[i], self.cells[i + n], self.cells[i + 2 * n], self.cells[i + 3 * n]])
    }
}

impl Display for Ring {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let cells = self.cells.iter()
            .map(|(r, c)| format!("({r},{c})"))
            .join(" ");
        write!(f, "size {}: {cells}", self.size)
    }
}

pub fn ring_count(dim: usize) -> usize {
    dim / 2
}

/// Computes ring `cycle` of a `dim`x`dim` matrix, counting inward from the
/// outer edge. The center cell of an odd matrix belongs to no ring.
///
/// Panics if `cycle >= ring_count(dim)`.
pub fn compute_ring(dim: usize, cycle: usize) -> Ring {
    assert!(cycle < ring_count(dim), "ring {cycle} out of range for dimension {dim}");
    let lo = cycle;
    let hi = dim - 1 - cycle;
    let size = hi - lo;

    let mut cells = Vec::with_capacity(4 * size);
    // top, including both corners
    cells.extend((lo..=hi).map(|col| (lo, col)));
    // right
    cells.extend((lo + 1..=hi).map(|row| (row, hi)));
    // bottom, right to left
    cells.extend((lo..hi).rev().map(|col| (hi, col)));
    // left, bottom to top, stopping short of the top-left corner
    cells.extend((lo + 1..hi).rev().map(|row| (row, lo)));
    debug_assert_eq!(cells.len(), 4 * size);

    Ring { cells, size }
}
