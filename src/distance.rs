//! Great-circle distance model and distance matrices.

use itertools::Itertools;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::error::MatrixValidationError;
use crate::problem::Coordinate;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance in meters between two coordinates.
///
/// The pair is put into a canonical order first, so the result is bitwise
/// symmetric.
pub fn haversine(a: Coordinate, b: Coordinate) -> f64 {
    let (from, to) = if (a.lat, a.lon) <= (b.lat, b.lon) {
        (a, b)
    } else {
        (b, a)
    };

    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}

/// Cache key for an unordered coordinate pair, built from the raw bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PairKey([u64; 4]);

impl PairKey {
    fn new(a: Coordinate, b: Coordinate) -> Self {
        let a_bits = [a.lat.to_bits(), a.lon.to_bits()];
        let b_bits = [b.lat.to_bits(), b.lon.to_bits()];
        let (first, second) = if a_bits <= b_bits {
            (a_bits, b_bits)
        } else {
            (b_bits, a_bits)
        };
        PairKey([first[0], first[1], second[0], second[1]])
    }
}

/// Memoized haversine distances, shared across threads.
///
/// Reads take a shared lock; a miss computes the distance outside the lock
/// and inserts it under the write lock.
#[derive(Debug, Default)]
pub struct DistanceCache {
    entries: RwLock<HashMap<PairKey, f64>>,
}

impl DistanceCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        DistanceCache::default()
    }

    /// Distance in meters between two coordinates.
    pub fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        let key = PairKey::new(a, b);
        if let Some(&d) = self.entries.read().get(&key) {
            return d;
        }

        let d = haversine(a, b);
        self.entries.write().insert(key, d);
        d
    }

    /// Build the full distance matrix for a node list.
    pub fn matrix(&self, nodes: &[Coordinate]) -> DistanceMatrix {
        let n = nodes.len();
        let mut rows = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let d = self.distance(nodes[i], nodes[j]);
                rows[i][j] = d;
                rows[j][i] = d;
            }
        }

        DistanceMatrix { rows }
    }

    /// Number of cached pairs.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop all cached pairs.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

/// A dense distance matrix indexed by node position.
///
/// Node 0 is the depot whenever the matrix is handed to a sequencer.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Wrap raw rows. Shape and values are checked by [`DistanceMatrix::validate`].
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        DistanceMatrix { rows }
    }

    /// Distance from node `from` to node `to`.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.rows[from][to]
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the matrix has no nodes.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Reject matrices that are not square or contain NaN/infinite entries.
    pub fn validate(&self) -> Result<(), MatrixValidationError> {
        let expected = self.rows.len();

        for (row, values) in self.rows.iter().enumerate() {
            if values.len() != expected {
                return Err(MatrixValidationError::NotSquare {
                    row,
                    len: values.len(),
                    expected,
                });
            }
            if let Some((col, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(MatrixValidationError::NonFinite { row, col, value });
            }
        }

        Ok(())
    }

    /// Total length of a closed tour visiting `tour` in order and returning
    /// to its first node.
    pub fn tour_cost(&self, tour: &[usize]) -> f64 {
        if tour.len() < 2 {
            return tour.first().map_or(0.0, |&n| self.get(n, n));
        }

        tour.iter()
            .circular_tuple_windows::<(&usize, &usize)>()
            .map(|(&from, &to)| self.get(from, to))
            .sum()
    }
}
