//! Core traits for kernel construction

/// Quality function trait
///
/// Maps the parameter·feature value of a pair to its quality. The resulting
/// L-ensemble is only well behaved when the function is convex and
/// non-negative; implementations are trusted to honour that, nothing here
/// checks it.
pub trait QualityFunction: Send + Sync {
    /// Compute the quality of a single pair
    fn quality(&self, value: f64) -> f64;

    /// Apply the function elementwise
    fn quality_vector(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.quality(v)).collect()
    }
}

impl<F> QualityFunction for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn quality(&self, value: f64) -> f64 {
        self(value)
    }
}
