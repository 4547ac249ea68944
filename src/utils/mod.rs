//! Utility functions for inspecting kernels

use ndarray::Array2;

/// Largest |M(i, j) - M(j, i)| over all entries
///
/// Returns `f64::INFINITY` for a non-square matrix. NaN entries compare as
/// asymmetric.
pub fn max_asymmetry(matrix: &Array2<f64>) -> f64 {
    if !matrix.is_square() {
        return f64::INFINITY;
    }

    let n = matrix.nrows();
    let mut worst: f64 = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let gap = (matrix[[i, j]] - matrix[[j, i]]).abs();
            if gap.is_nan() {
                return f64::INFINITY;
            }
            worst = worst.max(gap);
        }
    }
    worst
}

/// Check symmetry within an absolute tolerance
pub fn is_symmetric(matrix: &Array2<f64>, tolerance: f64) -> bool {
    max_asymmetry(matrix) <= tolerance
}

/// Summary statistics of a kernel and its quality vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelStats {
    pub trace: f64,
    pub max_asymmetry: f64,
    pub min_quality: f64,
    pub max_quality: f64,
    pub mean_quality: f64,
}

impl KernelStats {
    /// Compute statistics; quality statistics are zero for an empty vector
    pub fn compute(kernel: &Array2<f64>, quality: &[f64]) -> Self {
        let trace = kernel.diag().sum();

        let (min_quality, max_quality, mean_quality) = if quality.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            let min = quality.iter().fold(f64::INFINITY, |a, &b| a.min(b));
            let max = quality.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
            let mean = quality.iter().sum::<f64>() / quality.len() as f64;
            (min, max, mean)
        };

        Self {
            trace,
            max_asymmetry: max_asymmetry(kernel),
            min_quality,
            max_quality,
            mean_quality,
        }
    }
}
