//! Tour sequencing for a single vehicle (a TSP over depot + assigned stops).

pub mod annealing;
pub mod nearest_neighbor;

use log::{debug, warn};

use crate::distance::DistanceMatrix;
use crate::error::{MatrixValidationError, SequencerError};

pub use self::annealing::SimulatedAnnealing;
pub use self::nearest_neighbor::NearestNeighbor;

/// Index of the depot in every matrix handed to a sequencer.
pub const DEPOT: usize = 0;

/// A closed tour over matrix indices and its total length.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    pub permutation: Vec<usize>,
    pub cost: f64,
}

impl Tour {
    /// Create a tour.
    pub fn new(permutation: Vec<usize>, cost: f64) -> Self {
        Tour { permutation, cost }
    }

    /// Rotate the tour so that `start` comes first. The cost of a closed
    /// tour does not depend on its starting point.
    pub fn rotate_to(&mut self, start: usize) {
        if let Some(pos) = self.permutation.iter().position(|&n| n == start) {
            self.permutation.rotate_left(pos);
        }
    }

    /// Nodes visited after leaving `DEPOT`, excluding the depot itself.
    pub fn stops(&self) -> impl Iterator<Item = usize> + '_ {
        self.permutation.iter().copied().filter(|&n| n != DEPOT)
    }

    /// Check that the tour visits each of `nodes` indices exactly once.
    pub fn is_permutation_of(&self, nodes: usize) -> bool {
        if self.permutation.len() != nodes {
            return false;
        }
        let mut seen = vec![false; nodes];
        for &n in &self.permutation {
            if n >= nodes || seen[n] {
                return false;
            }
            seen[n] = true;
        }
        true
    }
}

/// A TSP solver over a validated distance matrix.
pub trait Sequencer {
    /// Produce a closed tour over all nodes of `matrix`.
    fn sequence(&self, matrix: &DistanceMatrix) -> Result<Tour, SequencerError>;
}

/// How `TourSequencer` picks its solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencingStrategy {
    /// Primary solver, with the fallback on any solver failure
    Hybrid,
    /// Fallback only, never touching the primary solver
    FallbackOnly,
}

/// Validates a matrix, runs the selected solver and normalizes the tour so
/// that the depot comes first.
pub struct TourSequencer<P: Sequencer = SimulatedAnnealing> {
    primary: P,
    fallback: NearestNeighbor,
    strategy: SequencingStrategy,
}

impl<P: Sequencer> TourSequencer<P> {
    /// Create a sequencer around a primary solver.
    pub fn new(primary: P, strategy: SequencingStrategy) -> Self {
        TourSequencer {
            primary,
            fallback: NearestNeighbor,
            strategy,
        }
    }

    /// The primary solver.
    pub fn primary(&self) -> &P {
        &self.primary
    }

    /// The strategy in use.
    pub fn strategy(&self) -> SequencingStrategy {
        self.strategy
    }

    /// Sequence the nodes of `matrix`, node 0 being the depot.
    ///
    /// Non-finite or ragged matrices are rejected before any solver runs.
    /// Up to two nodes the tour is built directly. Primary solver failures
    /// are answered with the nearest-neighbor tour and never returned.
    pub fn solve(&self, matrix: &DistanceMatrix) -> Result<Tour, MatrixValidationError> {
        matrix.validate()?;

        let nodes = matrix.len();
        let mut tour = if nodes <= 2 {
            trivial_tour(matrix)
        } else {
            match self.strategy {
                SequencingStrategy::FallbackOnly => self.fallback.tour(matrix),
                SequencingStrategy::Hybrid => self.solve_with_fallback(matrix),
            }
        };

        tour.rotate_to(DEPOT);
        Ok(tour)
    }

    fn solve_with_fallback(&self, matrix: &DistanceMatrix) -> Tour {
        let nodes = matrix.len();
        debug!("Running primary solver for {} nodes", nodes);

        let result = self.primary.sequence(matrix).and_then(|tour| {
            if tour.is_permutation_of(nodes) {
                Ok(tour)
            } else {
                Err(SequencerError::InvalidPermutation { nodes })
            }
        });

        match result {
            Ok(tour) => tour,
            Err(e) => {
                warn!("Primary solver failed ({}), using nearest-neighbor tour", e);
                self.fallback.tour(matrix)
            }
        }
    }
}

/// Tours of at most two nodes need no search.
fn trivial_tour(matrix: &DistanceMatrix) -> Tour {
    match matrix.len() {
        0 => Tour::new(Vec::new(), 0.0),
        1 => Tour::new(vec![DEPOT], 0.0),
        _ => Tour::new(vec![0, 1], matrix.get(0, 1) + matrix.get(1, 0)),
    }
}
