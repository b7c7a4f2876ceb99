//! Deterministic nearest-neighbor tour construction.

use crate::distance::DistanceMatrix;
use crate::error::SequencerError;

use super::{Sequencer, Tour, DEPOT};

/// Starts at the depot and always moves to the closest unvisited node,
/// then closes the tour. Ties go to the lowest index.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighbor;

impl NearestNeighbor {
    /// Build the tour. Never fails.
    pub fn tour(&self, matrix: &DistanceMatrix) -> Tour {
        let n = matrix.len();
        if n == 0 {
            return Tour::new(Vec::new(), 0.0);
        }

        let mut visited = vec![false; n];
        let mut permutation = Vec::with_capacity(n);
        let mut current = DEPOT;
        let mut cost = 0.0;

        visited[current] = true;
        permutation.push(current);

        for _ in 1..n {
            let mut next: Option<(usize, f64)> = None;
            for (candidate, &seen) in visited.iter().enumerate() {
                if seen {
                    continue;
                }
                let d = matrix.get(current, candidate);
                if next.map_or(true, |(_, best)| d < best) {
                    next = Some((candidate, d));
                }
            }

            let Some((node, d)) = next else { break };
            visited[node] = true;
            permutation.push(node);
            cost += d;
            current = node;
        }

        cost += matrix.get(current, DEPOT);
        Tour::new(permutation, cost)
    }
}

impl Sequencer for NearestNeighbor {
    fn sequence(&self, matrix: &DistanceMatrix) -> Result<Tour, SequencerError> {
        Ok(self.tour(matrix))
    }
}
