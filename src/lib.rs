//! # CVRP Router
//!
//! Assigns geographically distributed stops to a fleet of capacity-limited
//! vehicles and sequences each vehicle's visits, starting and ending at a
//! single depot.
//!
//! The engine works in two phases:
//!
//! 1. a greedy, capacity-aware nearest-stop clustering of stops onto vehicles;
//! 2. a per-vehicle tour (a small TSP) solved by simulated annealing, with a
//!    deterministic nearest-neighbor construction as fallback.
//!
//! Distances are great-circle (haversine) distances and are memoized across
//! both phases.

pub mod aggregator;
pub mod assignment;
pub mod config;
pub mod distance;
pub mod error;
pub mod problem;
pub mod sequencer;
pub mod solution;
pub mod utils;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::assignment::{Assignment, VehicleAssignment};
use crate::config::Config;
use crate::distance::DistanceCache;
use crate::error::{OptimizationError, PartialAssignmentWarning};
use crate::problem::{Problem, Stop, Vehicle};
use crate::sequencer::{SequencingStrategy, SimulatedAnnealing, TourSequencer};
use crate::solution::{OptimizationResult, Route};

/// Drives validation, assignment, sequencing and aggregation.
pub struct RouteOptimizer {
    pub config: Config,
    distances: DistanceCache,
    sequencer: TourSequencer,
}

impl RouteOptimizer {
    /// Create an optimizer for the given configuration.
    pub fn new(config: Config) -> Self {
        let strategy = if config.force_fallback {
            SequencingStrategy::FallbackOnly
        } else {
            SequencingStrategy::Hybrid
        };
        let primary = SimulatedAnnealing::new(config.annealing.clone(), config.seed);

        RouteOptimizer {
            config,
            distances: DistanceCache::new(),
            sequencer: TourSequencer::new(primary, strategy),
        }
    }

    /// The distance cache shared by all runs of this optimizer.
    ///
    /// Entries are never evicted: the cache holds every coordinate pair seen
    /// since it was created or last cleared. Optimizers that outlive many
    /// unrelated stop sets should call [`DistanceCache::clear`] between them.
    pub fn distances(&self) -> &DistanceCache {
        &self.distances
    }

    /// Route `stops` (exactly one of them the depot) with `vehicles`.
    pub fn run(
        &self,
        stops: &[Stop],
        vehicles: &[Vehicle],
    ) -> Result<OptimizationResult, OptimizationError> {
        let problem = Problem::new(stops, vehicles)?;
        info!(
            "Starting optimization: {} stops, {} vehicles",
            problem.get_client_count(),
            problem.vehicles.len()
        );

        let Assignment {
            vehicles: assignments,
            unassigned,
        } = assignment::assign_stops(&problem, &self.distances);

        let unassigned = if unassigned.is_empty() {
            None
        } else {
            let warning = PartialAssignmentWarning {
                stop_ids: unassigned
                    .iter()
                    .map(|&i| problem.clients[i].id.clone())
                    .collect(),
            };
            warn!("{}", warning);
            Some(warning)
        };

        let loaded: Vec<&VehicleAssignment> =
            assignments.iter().filter(|a| !a.is_empty()).collect();

        let routes = if self.config.parallel {
            loaded
                .par_iter()
                .map(|a| self.route_for(&problem, a))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            loaded
                .iter()
                .map(|a| self.route_for(&problem, a))
                .collect::<Result<Vec<_>, _>>()?
        };

        let result = OptimizationResult::new(routes, unassigned);
        info!(
            "Optimization finished: {} routes, {:.2} km",
            result.get_route_count(),
            result.total_distance_m() / 1000.0
        );

        Ok(result)
    }

    /// Sequence one vehicle's stops and compute its metrics.
    fn route_for(
        &self,
        problem: &Problem,
        assignment: &VehicleAssignment,
    ) -> Result<Route, OptimizationError> {
        let vehicle = &problem.vehicles[assignment.vehicle];

        let nodes: Vec<&Stop> = std::iter::once(&problem.depot)
            .chain(assignment.stops.iter().map(|&i| &problem.clients[i]))
            .collect();
        let coordinates: Vec<_> = nodes.iter().map(|s| s.coordinate()).collect();

        let matrix = self.distances.matrix(&coordinates);
        let tour = self.sequencer.solve(&matrix)?;
        debug!(
            "Vehicle {}: {} stops, {:.1} m",
            vehicle.id,
            assignment.stops.len(),
            tour.cost
        );

        Ok(aggregator::build_route(vehicle, &nodes, &tour, &self.config))
    }
}
