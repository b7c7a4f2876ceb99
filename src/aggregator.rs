//! Turns a sequenced vehicle assignment into a `Route` with its metrics.

use crate::config::Config;
use crate::problem::{Stop, Vehicle};
use crate::sequencer::Tour;
use crate::solution::Route;

/// Share of `capacity` consumed by `demand`, in percent. Zero capacity
/// yields 0.
pub fn utilization_pct(demand: u64, capacity: u32) -> f64 {
    if capacity == 0 {
        0.0
    } else {
        demand as f64 / f64::from(capacity) * 100.0
    }
}

/// Hours needed to drive `distance_km` at `speed_kmh`. Non-positive speeds
/// yield 0.
pub fn travel_time_hours(distance_km: f64, speed_kmh: f64) -> f64 {
    if speed_kmh > 0.0 {
        distance_km / speed_kmh
    } else {
        0.0
    }
}

/// Build the route of `vehicle`.
///
/// `nodes` are the stops in matrix order, depot first, and `tour` is the
/// normalized tour over those indices.
pub fn build_route(vehicle: &Vehicle, nodes: &[&Stop], tour: &Tour, config: &Config) -> Route {
    let ordered_stop_ids: Vec<String> = tour
        .stops()
        .map(|idx| nodes[idx])
        .filter(|stop| !stop.is_depot)
        .map(|stop| stop.id.clone())
        .collect();

    let total_demand: u64 = nodes
        .iter()
        .filter(|stop| !stop.is_depot)
        .map(|stop| u64::from(stop.demand))
        .sum();

    let distance_m = tour.cost.max(0.0);
    let distance_km = distance_m / 1000.0;

    Route {
        vehicle_id: vehicle.id.clone(),
        capacity: vehicle.capacity,
        total_demand,
        utilization_pct: utilization_pct(total_demand, vehicle.capacity),
        ordered_stop_ids,
        distance_m,
        distance_km,
        cost: distance_km * config.cost_per_km,
        travel_time_h: travel_time_hours(distance_km, config.average_speed_kmh),
    }
}
