//! Kernel assembly
//!
//! The L-ensemble kernel is defined as: L(i, j) = q(i) * S(i, j) * q(j)
//! i.e. the similarity matrix scaled on both sides by the quality vector.

use ndarray::Array2;

/// Assemble the L-ensemble kernel from qualities and a similarity matrix
///
/// Symmetry of the result follows from symmetry of `similarity`; it is not
/// checked here.
///
/// # Panics
/// Panics if `similarity` is not `n × n` with `n = quality.len()`
pub fn assemble_kernel(quality: &[f64], similarity: &Array2<f64>) -> Array2<f64> {
    let n = quality.len();
    assert!(
        similarity.dim() == (n, n),
        "Similarity matrix must be {}x{}, got {}x{}",
        n,
        n,
        similarity.nrows(),
        similarity.ncols()
    );

    Array2::from_shape_fn((n, n), |(i, j)| quality[i] * similarity[[i, j]] * quality[j])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_identity_similarity_gives_squared_quality_diagonal() {
        let kernel = assemble_kernel(&[1.0, 2.0, 3.0], &Array2::eye(3));
        assert_eq!(kernel.diag().to_vec(), vec![1.0, 4.0, 9.0]);
        assert_eq!(kernel[[0, 1]], 0.0);
        assert_eq!(kernel[[2, 1]], 0.0);
    }

    #[test]
    fn test_outer_product_scaling() {
        let similarity = array![[1.0, 0.5], [0.5, 1.0]];
        let kernel = assemble_kernel(&[2.0, 3.0], &similarity);
        assert_relative_eq!(kernel[[0, 0]], 4.0);
        assert_relative_eq!(kernel[[0, 1]], 3.0);
        assert_relative_eq!(kernel[[1, 0]], 3.0);
        assert_relative_eq!(kernel[[1, 1]], 9.0);
    }

    #[test]
    fn test_symmetric_similarity_gives_symmetric_kernel() {
        let similarity =
            Array2::from_shape_fn((4, 4), |(i, j)| 1.0 / (1.0 + (i as f64 - j as f64).abs()));
        let quality = [0.3, 1.7, 2.2, 0.9];
        let kernel = assemble_kernel(&quality, &similarity);
        for i in 0..4 {
            for j in 0..4 {
                assert_relative_eq!(kernel[[i, j]], kernel[[j, i]], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_asymmetric_similarity_passed_through() {
        let similarity = array![[1.0, 2.0], [0.0, 1.0]];
        let kernel = assemble_kernel(&[1.0, 1.0], &similarity);
        assert_eq!(kernel[[0, 1]], 2.0);
        assert_eq!(kernel[[1, 0]], 0.0);
    }

    #[test]
    fn test_empty_kernel() {
        let kernel = assemble_kernel(&[], &Array2::zeros((0, 0)));
        assert_eq!(kernel.dim(), (0, 0));
    }

    #[test]
    #[should_panic(expected = "Similarity matrix must be 2x2")]
    fn test_shape_mismatch() {
        assemble_kernel(&[1.0, 1.0], &Array2::eye(3));
    }
}
