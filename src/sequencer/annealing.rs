//! Simulated annealing over segment reversals (2-opt moves).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

use crate::config::AnnealingConfig;
use crate::distance::DistanceMatrix;
use crate::error::SequencerError;

use super::{NearestNeighbor, Sequencer, Tour};

/// Seeded simulated annealing solver.
///
/// The search starts from the nearest-neighbor tour with the depot pinned at
/// position 0, and returns the best tour seen, so it is never worse than its
/// starting point. The temperature starts at the mean edge length of the
/// starting tour times `initial_temperature_factor` and cools geometrically.
/// It converges when the temperature falls below `min_temperature_ratio` of
/// the start, or after `max_stale_steps` steps without a new best. Running out
/// of `max_iterations` moves or of `time_limit` first is reported as an error.
#[derive(Debug, Clone)]
pub struct SimulatedAnnealing {
    config: AnnealingConfig,
    seed: u64,
}

impl SimulatedAnnealing {
    /// Create a solver.
    pub fn new(config: AnnealingConfig, seed: u64) -> Self {
        SimulatedAnnealing { config, seed }
    }

    /// The seed used for every run.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Sequencer for SimulatedAnnealing {
    fn sequence(&self, matrix: &DistanceMatrix) -> Result<Tour, SequencerError> {
        let start_time = Instant::now();
        let nodes = matrix.len();
        let initial = NearestNeighbor.tour(matrix);

        // Reversals need at least two movable positions after the depot.
        if nodes < 3 || initial.cost <= 0.0 {
            return Ok(initial);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut current = initial.permutation;
        let mut current_cost = initial.cost;
        let mut best = current.clone();
        let mut best_cost = current_cost;

        let initial_temperature =
            self.config.initial_temperature_factor * current_cost / nodes as f64;
        let min_temperature = initial_temperature * self.config.min_temperature_ratio;
        let moves_per_step = (self.config.moves_per_node * nodes).max(1);

        let mut temperature = initial_temperature;
        let mut moves: u64 = 0;
        let mut stale_steps = 0;

        while temperature > min_temperature && stale_steps < self.config.max_stale_steps {
            let mut improved = false;

            for _ in 0..moves_per_step {
                if moves >= self.config.max_iterations {
                    return Err(SequencerError::BudgetExhausted {
                        budget: self.config.max_iterations,
                    });
                }
                moves += 1;

                let mut i = rng.gen_range(1..nodes);
                let mut j = rng.gen_range(1..nodes);
                if i == j {
                    continue;
                }
                if i > j {
                    std::mem::swap(&mut i, &mut j);
                }

                current[i..=j].reverse();
                let candidate_cost = matrix.tour_cost(&current);
                let delta = candidate_cost - current_cost;

                if delta <= 0.0 || rng.gen::<f64>() < (-delta / temperature).exp() {
                    current_cost = candidate_cost;
                    if current_cost < best_cost - 1e-9 {
                        best_cost = current_cost;
                        best.copy_from_slice(&current);
                        improved = true;
                    }
                } else {
                    current[i..=j].reverse();
                }
            }

            if let Some(limit) = self.config.time_limit {
                if start_time.elapsed() >= limit {
                    return Err(SequencerError::TimeLimitExceeded {
                        limit_ms: limit.as_millis(),
                    });
                }
            }

            stale_steps = if improved { 0 } else { stale_steps + 1 };
            temperature *= self.config.cooling_rate;
        }

        Ok(Tour::new(best, best_cost))
    }
}
