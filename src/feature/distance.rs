//! Transmitter-to-receiver distance matrices

use crate::core::PointSet;
use log::warn;
use ndarray::Array2;

/// Distance from every transmitter `i` to every receiver `j`
///
/// Entry (i, j) is `hypot(x_tx[i] - x_rx[j], y_tx[i] - y_rx[j])`; the
/// diagonal holds the own-pair distances.
pub fn pair_distance_matrix(points: &PointSet) -> Array2<f64> {
    let tx = points.transmitters();
    let rx = points.receivers();
    Array2::from_shape_fn((tx.len(), rx.len()), |(i, j)| tx[i].distance_to(&rx[j]))
}

/// Distances rescaled by each transmitter's own-pair distance
///
/// Row `i` is divided by the distance between transmitter `i` and its own
/// receiver, then the diagonal is set to +infinity so that a pair never
/// counts its own receiver as a neighbour.
///
/// A transmitter sitting on its own receiver divides by zero; the resulting
/// NaN/infinite entries are passed through unchanged.
pub fn rescaled_distances(points: &PointSet) -> Array2<f64> {
    let mut dist = pair_distance_matrix(points);

    for (i, mut row) in dist.outer_iter_mut().enumerate() {
        let own = row[i];
        if own == 0.0 {
            warn!(
                "Pair {} has a zero transmitter-receiver distance; its rescaled distances are not finite",
                i
            );
        }
        row.mapv_inplace(|d| d / own);
        row[i] = f64::INFINITY;
    }

    dist
}
