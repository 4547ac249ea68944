//! High-level API for building L-ensemble kernels
//!
//! This module provides the entry points for turning transmitter/receiver
//! geometry, a similarity matrix and fitted parameters into the kernel of a
//! determinantal point process.
//!
//! # Quick Start
//!
//! ```rust
//! use dppkernel::api::PairKernelBuilder;
//! use dppkernel::PointSet;
//! use ndarray::Array2;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let points = PointSet::from_coords(
//!     &[0.0, 10.0, 0.0],
//!     &[0.0, 0.0, 10.0],
//!     &[1.0, 11.0, 0.0],
//!     &[0.0, 0.0, 11.0],
//! )?;
//! let similarity = Array2::eye(3);
//!
//! let result = PairKernelBuilder::new(vec![1.0, -0.1])
//!     .with_feature_count(2)
//!     .build(&points, &similarity)?;
//!
//! assert_eq!(result.quality().len(), 3);
//! assert_eq!(result.kernel().dim(), (3, 3));
//! # Ok(())
//! # }
//! ```

use crate::core::{DppError, Point, PointSet, QualityFunction, Result};
use crate::feature::{theta_features, FeatureMode};
use crate::kernel::assemble_kernel;
use crate::quality::{apply_quality, PowerQuality};
use log::debug;
use ndarray::Array2;

/// Kernel matrix together with the quality vector it was built from
#[derive(Debug, Clone, PartialEq)]
pub struct PairKernel {
    kernel: Array2<f64>,
    quality: Vec<f64>,
    theta_feature: Vec<f64>,
    mode: FeatureMode,
    feature_count: usize,
}

impl PairKernel {
    /// The N×N L-ensemble kernel
    pub fn kernel(&self) -> &Array2<f64> {
        &self.kernel
    }

    /// Quality of every pair
    pub fn quality(&self) -> &[f64] {
        &self.quality
    }

    /// Parameter·feature values the qualities were computed from
    pub fn theta_feature(&self) -> &[f64] {
        &self.theta_feature
    }

    /// Feature mode resolved from the requested feature count
    pub fn mode(&self) -> FeatureMode {
        self.mode
    }

    /// Effective feature count (a zero request is reported as the theta length)
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Number of transmitter/receiver pairs
    pub fn len(&self) -> usize {
        self.quality.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quality.is_empty()
    }

    /// Split into kernel and quality vector
    pub fn into_parts(self) -> (Array2<f64>, Vec<f64>) {
        (self.kernel, self.quality)
    }
}

/// Kernel builder with a configurable quality function
pub struct PairKernelBuilder<Q: QualityFunction = PowerQuality> {
    theta: Vec<f64>,
    feature_count: usize,
    quality: Q,
}

impl PairKernelBuilder<PowerQuality> {
    /// Create a builder with the default |v|^2 quality and no features
    pub fn new(theta: Vec<f64>) -> Self {
        Self {
            theta,
            feature_count: 0,
            quality: PowerQuality::default(),
        }
    }
}

impl<Q: QualityFunction> PairKernelBuilder<Q> {
    /// Set the number of features
    ///
    /// 0 means no features: every pair gets `theta[0]` as its
    /// parameter·feature value and `theta[1..]` is ignored. 1 is the same
    /// constant term; 2 adds the nearest rescaled neighbour distance
    /// weighted by `theta[1]`, and k > 2 adds the k - 1 nearest distances
    /// weighted by `theta[1..k]`.
    pub fn with_feature_count(mut self, feature_count: usize) -> Self {
        self.feature_count = feature_count;
        self
    }

    /// Use a different quality function
    ///
    /// The function is applied verbatim. It must be convex and non-negative
    /// for the kernel to describe a well-posed L-ensemble; that is the
    /// caller's responsibility.
    pub fn with_quality<R: QualityFunction>(self, quality: R) -> PairKernelBuilder<R> {
        PairKernelBuilder {
            theta: self.theta,
            feature_count: self.feature_count,
            quality,
        }
    }

    pub fn theta(&self) -> &[f64] {
        &self.theta
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Build the kernel for a set of pairs
    pub fn build(&self, points: &PointSet, similarity: &Array2<f64>) -> Result<PairKernel> {
        let mode = FeatureMode::resolve(self.feature_count, self.theta.len(), points.len())?;
        build_with(points, similarity, &self.theta, mode, &self.quality)
    }
}

/// Build the L-ensemble kernel and quality vector for transmitter/receiver pairs
///
/// # Arguments
/// * `transmitters` - Transmitter locations, one per pair
/// * `receivers` - Receiver locations, paired by index with `transmitters`
/// * `similarity` - N×N similarity matrix, assumed symmetric
/// * `theta` - Quality model parameters, at least one
/// * `feature_count` - Number of features, 0 to use theta without features
/// * `quality` - Quality function, `None` for |v|^2
///
/// # Errors
/// Returns `DppError::InvalidParameter` if theta is empty, if `feature_count`
/// exceeds the length of theta, or if `feature_count > 1` exceeds the number
/// of pairs. Returns `DppError::DimensionMismatch` if the coordinate
/// sequences or the similarity matrix do not match the number of pairs.
pub fn build_pair_kernel(
    transmitters: &[Point],
    receivers: &[Point],
    similarity: &Array2<f64>,
    theta: &[f64],
    feature_count: usize,
    quality: Option<&dyn QualityFunction>,
) -> Result<PairKernel> {
    let mode = FeatureMode::resolve(feature_count, theta.len(), transmitters.len())?;
    let points = PointSet::new(transmitters.to_vec(), receivers.to_vec())?;

    match quality {
        Some(quality) => build_with(&points, similarity, theta, mode, quality),
        None => build_with(&points, similarity, theta, mode, &PowerQuality::default()),
    }
}

/// Run the pipeline for an already resolved feature mode
pub(crate) fn build_with<Q: QualityFunction + ?Sized>(
    points: &PointSet,
    similarity: &Array2<f64>,
    theta: &[f64],
    mode: FeatureMode,
    quality: &Q,
) -> Result<PairKernel> {
    let n = points.len();

    if similarity.nrows() != n {
        return Err(DppError::DimensionMismatch {
            expected: n,
            actual: similarity.nrows(),
        });
    }
    if similarity.ncols() != n {
        return Err(DppError::DimensionMismatch {
            expected: n,
            actual: similarity.ncols(),
        });
    }

    debug!(
        "Building {}x{} kernel with {:?} ({} theta values)",
        n,
        n,
        mode,
        theta.len()
    );

    let theta_feature = theta_features(points, theta, mode);
    let quality = apply_quality(quality, &theta_feature);
    let kernel = assemble_kernel(&quality, similarity);

    Ok(PairKernel {
        kernel,
        quality,
        theta_feature,
        mode,
        feature_count: mode.feature_count(theta.len()),
    })
}
