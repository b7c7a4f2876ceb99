//! Property checks over random instances.

use proptest::prelude::*;
use std::collections::HashSet;

use cvrp_router::config::Config;
use cvrp_router::distance::{haversine, DistanceMatrix};
use cvrp_router::error::OptimizationError;
use cvrp_router::problem::{Coordinate, Stop, Vehicle};
use cvrp_router::sequencer::NearestNeighbor;
use cvrp_router::RouteOptimizer;

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-89.0f64..89.0, -179.0f64..179.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
}

proptest! {
    #[test]
    fn distance_is_symmetric(a in coordinate(), b in coordinate()) {
        prop_assert_eq!(haversine(a, b), haversine(b, a));
        prop_assert!(haversine(a, b) >= 0.0);
        prop_assert!(haversine(a, a).abs() < 1e-6);
    }

    #[test]
    fn nearest_neighbor_is_deterministic(
        rows in prop::collection::vec(prop::collection::vec(0.0f64..100.0, 6), 6)
    ) {
        let matrix = DistanceMatrix::from_rows(rows);
        let first = NearestNeighbor.tour(&matrix);
        let second = NearestNeighbor.tour(&matrix);

        prop_assert!(first.is_permutation_of(6));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn runs_respect_capacity_and_serve_stops_once(
        clients in prop::collection::vec((-0.2f64..0.2, -0.2f64..0.2, 0u32..8), 1..15),
        capacities in prop::collection::vec(1u32..20, 1..5),
    ) {
        let mut stops = vec![Stop::depot("depot", 0.0, 0.0)];
        stops.extend(
            clients
                .iter()
                .enumerate()
                .map(|(i, &(lat, lon, demand))| Stop::new(format!("s{}", i), lat, lon, demand)),
        );
        let vehicles: Vec<Vehicle> = capacities
            .iter()
            .enumerate()
            .map(|(i, &c)| Vehicle::new(format!("vehicle_{}", i + 1), c))
            .collect();

        let config = Config::new().with_force_fallback(true).with_parallel(false);
        match RouteOptimizer::new(config).run(&stops, &vehicles) {
            Ok(result) => {
                let mut seen = HashSet::new();
                for route in &result.routes {
                    prop_assert!(route.total_demand <= u64::from(route.capacity));
                    prop_assert!(route.distance_m >= 0.0);
                    for id in &route.ordered_stop_ids {
                        prop_assert_ne!(id.as_str(), "depot");
                        prop_assert!(seen.insert(id.clone()));
                    }
                }
                let unassigned = result.unassigned.map_or(0, |w| w.stop_ids.len());
                prop_assert_eq!(seen.len() + unassigned, clients.len());
            }
            Err(OptimizationError::CapacityInfeasible { demand, capacity }) => {
                prop_assert!(demand > capacity);
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }
}
