//! Configuration parameters for an optimization run.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables passed to the orchestrator at call time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Operating cost per kilometer driven
    pub cost_per_km: f64,
    /// Average travel speed in km/h, used for time estimates
    pub average_speed_kmh: f64,
    /// Seed for the stochastic sequencer
    pub seed: u64,
    /// Skip the annealing solver and always build nearest-neighbor tours
    pub force_fallback: bool,
    /// Sequence vehicles concurrently
    pub parallel: bool,
    /// Settings of the annealing solver
    pub annealing: AnnealingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cost_per_km: 0.5,
            average_speed_kmh: 40.0,
            seed: 42,
            force_fallback: false,
            parallel: true,
            annealing: AnnealingConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the cost per kilometer.
    pub fn with_cost_per_km(mut self, cost: f64) -> Self {
        self.cost_per_km = cost;
        self
    }

    /// Set the average speed in km/h.
    pub fn with_average_speed_kmh(mut self, speed: f64) -> Self {
        self.average_speed_kmh = speed;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Force the deterministic nearest-neighbor path.
    pub fn with_force_fallback(mut self, force: bool) -> Self {
        self.force_fallback = force;
        self
    }

    /// Enable or disable concurrent sequencing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Replace the annealing settings.
    pub fn with_annealing(mut self, annealing: AnnealingConfig) -> Self {
        self.annealing = annealing;
        self
    }
}

/// Settings of the simulated annealing tour solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnealingConfig {
    /// Geometric cooling factor applied after every temperature step
    pub cooling_rate: f64,
    /// Starting temperature as a multiple of the mean edge length of the initial tour
    pub initial_temperature_factor: f64,
    /// The search converges once the temperature drops below this fraction of the start
    pub min_temperature_ratio: f64,
    /// Moves tried per node at each temperature step
    pub moves_per_node: usize,
    /// Temperature steps without a new best tour before the search converges
    pub max_stale_steps: usize,
    /// Hard budget of moves; exceeding it is a solver failure
    pub max_iterations: u64,
    /// Optional wall-clock budget; exceeding it is a solver failure
    pub time_limit: Option<Duration>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        AnnealingConfig {
            cooling_rate: 0.95,
            initial_temperature_factor: 1.0,
            min_temperature_ratio: 1e-4,
            moves_per_node: 10,
            max_stale_steps: 30,
            max_iterations: 2_000_000,
            time_limit: None,
        }
    }
}

impl AnnealingConfig {
    /// Create annealing settings with default values.
    pub fn new() -> Self {
        AnnealingConfig::default()
    }

    /// Set the cooling rate.
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Set the initial temperature factor.
    pub fn with_initial_temperature_factor(mut self, factor: f64) -> Self {
        self.initial_temperature_factor = factor;
        self
    }

    /// Set the moves tried per node at each temperature step.
    pub fn with_moves_per_node(mut self, moves: usize) -> Self {
        self.moves_per_node = moves;
        self
    }

    /// Set the number of non-improving temperature steps tolerated.
    pub fn with_max_stale_steps(mut self, steps: usize) -> Self {
        self.max_stale_steps = steps;
        self
    }

    /// Set the hard move budget.
    pub fn with_max_iterations(mut self, iterations: u64) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Set the time limit.
    pub fn with_time_limit(mut self, duration: Duration) -> Self {
        self.time_limit = Some(duration);
        self
    }
}
