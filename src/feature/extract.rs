//! Per-pair geometric features and the parameter·feature values

use crate::core::PointSet;
use crate::feature::{rescaled_distances, FeatureMode};
use log::debug;
use ndarray::{Array2, ArrayView1};
use std::cmp::Ordering;

/// Ascending order with every NaN after +infinity, whatever its sign bit
fn nan_last(a: &f64, b: &f64) -> Ordering {
    a.is_nan().cmp(&b.is_nan()).then(a.total_cmp(b))
}

/// Neighbour-distance features for every pair
///
/// Returns an `N × k` matrix where `k` is [`FeatureMode::neighbor_count`].
/// Row `i` holds the `k` smallest rescaled distances from transmitter `i` to
/// the other pairs' receivers, in ascending order. NaN distances are never
/// picked ahead of a number, so the first column always agrees with the
/// nearest-neighbour feature. Modes without geometric features yield an
/// `N × 0` matrix and skip the distance computation.
///
/// # Panics
/// Panics if the mode asks for more neighbours than there are other pairs
pub fn geometric_features(points: &PointSet, mode: FeatureMode) -> Array2<f64> {
    let n = points.len();
    let mut features = Array2::zeros((n, mode.neighbor_count()));

    match mode {
        FeatureMode::NoFeatures | FeatureMode::OneFeature => {}
        FeatureMode::NearestNeighbor => {
            let dist = rescaled_distances(points);
            for (i, row) in dist.outer_iter().enumerate() {
                features[[i, 0]] = row.iter().copied().fold(f64::INFINITY, f64::min);
            }
        }
        FeatureMode::TopKNeighbors(k) => {
            let dist = rescaled_distances(points);
            for (mut out, row) in features.outer_iter_mut().zip(dist.outer_iter()) {
                let mut sorted = row.to_vec();
                sorted.sort_by(nan_last);
                out.assign(&ArrayView1::from(&sorted[..k]));
            }
        }
    }

    features
}

/// Parameter·feature value for every pair
///
/// With no features requested, `theta[0]` is broadcast to each pair and the
/// rest of theta is ignored. Otherwise `theta[0]` is the weight of a constant
/// feature equal to one and `theta[1..]` weight the neighbour distances from
/// [`geometric_features`].
///
/// # Panics
/// Panics if `theta` is shorter than the mode's feature count; use
/// [`FeatureMode::resolve`] to obtain a mode that fits.
pub fn theta_features(points: &PointSet, theta: &[f64], mode: FeatureMode) -> Vec<f64> {
    assert!(
        !theta.is_empty() && theta.len() >= mode.feature_count(1),
        "theta is too short for the feature mode"
    );

    let n = points.len();
    debug!("Computing features for {} pairs in {:?} mode", n, mode);

    let mut values = vec![theta[0]; n];
    if !mode.uses_geometry() {
        return values;
    }

    let weights = ArrayView1::from(&theta[1..=mode.neighbor_count()]);
    let neighbour_terms = geometric_features(points, mode).dot(&weights);
    for (value, term) in values.iter_mut().zip(neighbour_terms.iter()) {
        *value += term;
    }

    values
}
