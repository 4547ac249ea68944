//! Core type definitions for kernel construction

use crate::core::{DppError, Result};
use ndarray::Array2;

/// A location in the plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Ordered set of transmitter/receiver pairs
///
/// Pair `i` is transmitter `i` together with receiver `i`. The two coordinate
/// sequences always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    transmitters: Vec<Point>,
    receivers: Vec<Point>,
}

impl PointSet {
    /// Create a point set from paired transmitter and receiver locations
    pub fn new(transmitters: Vec<Point>, receivers: Vec<Point>) -> Result<Self> {
        if transmitters.len() != receivers.len() {
            return Err(DppError::DimensionMismatch {
                expected: transmitters.len(),
                actual: receivers.len(),
            });
        }
        Ok(Self {
            transmitters,
            receivers,
        })
    }

    /// Create a point set from separate coordinate arrays
    pub fn from_coords(x_tx: &[f64], y_tx: &[f64], x_rx: &[f64], y_rx: &[f64]) -> Result<Self> {
        let n = x_tx.len();
        for len in [y_tx.len(), x_rx.len(), y_rx.len()] {
            if len != n {
                return Err(DppError::DimensionMismatch {
                    expected: n,
                    actual: len,
                });
            }
        }

        let transmitters = x_tx
            .iter()
            .zip(y_tx)
            .map(|(&x, &y)| Point::new(x, y))
            .collect();
        let receivers = x_rx
            .iter()
            .zip(y_rx)
            .map(|(&x, &y)| Point::new(x, y))
            .collect();
        Self::new(transmitters, receivers)
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.transmitters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transmitters.is_empty()
    }

    pub fn transmitters(&self) -> &[Point] {
        &self.transmitters
    }

    pub fn receivers(&self) -> &[Point] {
        &self.receivers
    }

    /// Distance between transmitter `i` and its own receiver
    pub fn own_pair_distance(&self, i: usize) -> f64 {
        self.transmitters[i].distance_to(&self.receivers[i])
    }
}

/// Build a matrix from nested rows; every row must have the same length
pub fn matrix_from_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);
    if let Some(row) = rows.iter().find(|row| row.len() != n_cols) {
        return Err(DppError::DimensionMismatch {
            expected: n_cols,
            actual: row.len(),
        });
    }

    let data: Vec<f64> = rows.iter().flatten().copied().collect();
    let len = data.len();
    Array2::from_shape_vec((n_rows, n_cols), data).map_err(|_| DppError::DimensionMismatch {
        expected: n_rows * n_cols,
        actual: len,
    })
}

/// Copy a matrix into nested rows
pub fn matrix_to_rows(matrix: &Array2<f64>) -> Vec<Vec<f64>> {
    matrix.outer_iter().map(|row| row.to_vec()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn test_point_set_creation() {
        let set = PointSet::from_coords(&[0.0, 10.0], &[0.0, 0.0], &[1.0, 11.0], &[0.0, 0.0])
            .expect("valid coordinates");
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
        assert_eq!(set.transmitters()[1], Point::new(10.0, 0.0));
        assert_eq!(set.receivers()[1], Point::new(11.0, 0.0));
        assert_eq!(set.own_pair_distance(0), 1.0);
    }

    #[test]
    fn test_point_set_length_mismatch() {
        let result = PointSet::new(
            vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            vec![Point::new(0.0, 1.0)],
        );
        assert!(matches!(
            result,
            Err(DppError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));

        let result = PointSet::from_coords(&[0.0], &[0.0, 1.0], &[0.0], &[0.0]);
        assert!(matches!(result, Err(DppError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_empty_point_set() {
        let set = PointSet::new(Vec::new(), Vec::new()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_matrix_from_rows() {
        let m = matrix_from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!(m.dim(), (3, 2));
        assert_eq!(m[[2, 1]], 6.0);
        assert_eq!(m, array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
    }

    #[test]
    fn test_matrix_from_ragged_rows() {
        let result = matrix_from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(
            result,
            Err(DppError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));

        // Same total length as 2x2 but not rectangular
        let result = matrix_from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0]]);
        assert!(matches!(result, Err(DppError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_matrix_from_no_rows() {
        let m = matrix_from_rows(&[]).unwrap();
        assert_eq!(m.dim(), (0, 0));
    }

    #[test]
    fn test_matrix_rows_roundtrip() {
        let m = Array2::from_shape_fn((2, 3), |(i, j)| (i * 3 + j) as f64);
        let rows = matrix_to_rows(&m);
        assert_eq!(rows, vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]]);
        assert_eq!(matrix_from_rows(&rows).unwrap(), m);
    }
}
