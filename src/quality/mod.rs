//! Quality functions for pair selection

pub mod power;

pub use self::power::*;

use crate::core::QualityFunction;

/// Apply a quality function to every parameter·feature value
pub fn apply_quality<Q: QualityFunction + ?Sized>(quality: &Q, theta_feature: &[f64]) -> Vec<f64> {
    quality.quality_vector(theta_feature)
}
