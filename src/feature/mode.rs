//! Feature-count resolution
//!
//! The requested feature count is validated against the parameter vector and
//! the number of pairs once, and turned into a [`FeatureMode`] that the
//! extraction step dispatches on.

use crate::core::{DppError, Result};
use serde::{Deserialize, Serialize};

/// Which geometric features feed the quality model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureMode {
    /// No features requested; theta is broadcast to every pair as is
    NoFeatures,
    /// Constant term only, theta[0] for every pair
    OneFeature,
    /// Constant term plus the nearest rescaled neighbour distance
    NearestNeighbor,
    /// Constant term plus the `k` nearest rescaled neighbour distances (k >= 2)
    TopKNeighbors(usize),
}

impl FeatureMode {
    /// Validate a requested feature count and resolve it into a mode
    ///
    /// # Arguments
    /// * `requested` - Feature count asked for by the caller, 0 meaning none
    /// * `theta_len` - Length of the parameter vector
    /// * `n_points` - Number of transmitter/receiver pairs
    pub fn resolve(requested: usize, theta_len: usize, n_points: usize) -> Result<Self> {
        if theta_len == 0 {
            return Err(DppError::InvalidParameter(
                "theta needs at least one element".to_string(),
            ));
        }
        if requested > theta_len {
            return Err(DppError::InvalidParameter(
                "not enough elements in theta".to_string(),
            ));
        }
        if requested > 1 && requested > n_points {
            return Err(DppError::InvalidParameter(
                "need more points for theta vector of given length".to_string(),
            ));
        }

        Ok(match requested {
            0 => Self::NoFeatures,
            1 => Self::OneFeature,
            2 => Self::NearestNeighbor,
            k => Self::TopKNeighbors(k - 1),
        })
    }

    /// Effective number of features once a zero request is normalised to
    /// the full parameter vector
    pub fn feature_count(&self, theta_len: usize) -> usize {
        match self {
            Self::NoFeatures => theta_len,
            Self::OneFeature => 1,
            Self::NearestNeighbor => 2,
            Self::TopKNeighbors(k) => k + 1,
        }
    }

    /// Number of neighbour distances taken per pair
    pub fn neighbor_count(&self) -> usize {
        match self {
            Self::NoFeatures | Self::OneFeature => 0,
            Self::NearestNeighbor => 1,
            Self::TopKNeighbors(k) => *k,
        }
    }

    /// Whether the pairwise distance matrix is needed at all
    pub fn uses_geometry(&self) -> bool {
        self.neighbor_count() > 0
    }
}
