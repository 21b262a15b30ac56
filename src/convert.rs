use ndarray::{s, Array2, ArrayView2};

use crate::matrix::Matrix;

pub fn matrix_to_array<T: Clone>(matrix: &Matrix<T>) -> Array2<T> {
    let dim = matrix.dim();
    Array2::from_shape_fn((dim, dim), |idx| matrix[idx].clone())
}

pub fn try_array_to_matrix<T: Clone>(array: ArrayView2<T>) -> anyhow::Result<Matrix<T>> {
    let (rows, cols) = array.dim();
    anyhow::ensure!(rows == cols, "array must be square, got {rows}x{cols}");

    Matrix::new(array.outer_iter().map(|row| row.to_vec()).collect())
}

/// Clockwise quarter turn as a strided view; used to check the in-place rotation.
pub fn rotate_array<T: Clone>(array: ArrayView2<T>) -> Array2<T> {
    array.slice_move(s![..;-1, ..]).reversed_axes().to_owned()
}

#[cfg(test)]
mod tests {
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::rotate::rotate;

    #[test]
    fn round_trip_keeps_layout() {
        let m = Matrix::enumerated(3);
        let a = matrix_to_array(&m);
        assert_eq!(a, array![[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        assert_eq!(try_array_to_matrix(a.view()).unwrap(), m);
    }

    #[test]
    fn non_square_array_rejected() {
        let a = array![[1, 2, 3], [4, 5, 6]];
        assert!(try_array_to_matrix(a.view()).is_err());
    }

    #[test]
    fn rotate_array_matches_ring_rotation() {
        let mut rng = StdRng::seed_from_u64(42);
        for dim in 0..=11 {
            let mut m = Matrix::random(dim, &mut rng, 0..=99);
            let expected = rotate_array(matrix_to_array(&m).view());
            rotate(&mut m);
            assert_eq!(matrix_to_array(&m), expected, "dim {dim}");
        }
    }
}
