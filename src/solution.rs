//! Route and result representation handed to external collaborators.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::PartialAssignmentWarning;

/// Mean utilization below which a fleet is reported as under-used.
pub const UNDERUTILIZATION_THRESHOLD_PCT: f64 = 65.0;

/// The sequenced route of one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub vehicle_id: String,
    pub capacity: u32,
    /// Sum of the demand of the stops on this route
    pub total_demand: u64,
    pub utilization_pct: f64,
    /// Visiting order; the depot is implicit at both ends
    pub ordered_stop_ids: Vec<String>,
    /// Round-trip length in meters
    pub distance_m: f64,
    pub distance_km: f64,
    pub cost: f64,
    pub travel_time_h: f64,
}

impl Route {
    /// Number of stops served.
    pub fn len(&self) -> usize {
        self.ordered_stop_ids.len()
    }

    /// Check if the route serves no stop.
    pub fn is_empty(&self) -> bool {
        self.ordered_stop_ids.is_empty()
    }
}

/// Output of a successful optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Routes ordered by the numeric suffix of their vehicle id
    pub routes: Vec<Route>,
    /// Stops left out by the assignment pass, if any
    pub unassigned: Option<PartialAssignmentWarning>,
}

impl OptimizationResult {
    /// Create a result, sorting `routes` by vehicle id.
    pub fn new(mut routes: Vec<Route>, unassigned: Option<PartialAssignmentWarning>) -> Self {
        routes.sort_by(|a, b| compare_vehicle_ids(&a.vehicle_id, &b.vehicle_id));
        OptimizationResult { routes, unassigned }
    }

    /// Total fleet distance in meters.
    pub fn total_distance_m(&self) -> f64 {
        self.routes.iter().map(|r| r.distance_m).sum()
    }

    /// Get the number of routes.
    pub fn get_route_count(&self) -> usize {
        self.routes.len()
    }

    /// Find the route of a vehicle.
    pub fn route_for(&self, vehicle_id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.vehicle_id == vehicle_id)
    }

    /// Compute fleet-level indicators, given the size of the fleet offered.
    pub fn summary(&self, fleet_size: usize) -> FleetSummary {
        let vehicles_used = self.routes.len();
        let average_utilization_pct = if vehicles_used == 0 {
            0.0
        } else {
            self.routes.iter().map(|r| r.utilization_pct).sum::<f64>() / vehicles_used as f64
        };

        FleetSummary {
            vehicles_used,
            fleet_size,
            total_distance_km: self.routes.iter().map(|r| r.distance_km).sum(),
            total_cost: self.routes.iter().map(|r| r.cost).sum(),
            total_travel_time_h: self.routes.iter().map(|r| r.travel_time_h).sum(),
            total_demand: self.routes.iter().map(|r| r.total_demand).sum(),
            average_utilization_pct,
            unassigned_stops: self.unassigned.as_ref().map_or(0, |w| w.stop_ids.len()),
        }
    }
}

/// Fleet-level indicators of a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub vehicles_used: usize,
    pub fleet_size: usize,
    pub total_distance_km: f64,
    pub total_cost: f64,
    pub total_travel_time_h: f64,
    pub total_demand: u64,
    pub average_utilization_pct: f64,
    pub unassigned_stops: usize,
}

impl FleetSummary {
    /// Check if the mean utilization of used vehicles is low enough to
    /// suggest smaller vehicles or consolidated routes.
    pub fn is_underutilized(&self) -> bool {
        self.vehicles_used > 0 && self.average_utilization_pct < UNDERUTILIZATION_THRESHOLD_PCT
    }
}

impl fmt::Display for FleetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vehicles Used: {}/{}", self.vehicles_used, self.fleet_size)?;
        writeln!(f, "Total Distance: {:.2} km", self.total_distance_km)?;
        writeln!(f, "Total Cost: {:.2}", self.total_cost)?;
        writeln!(f, "Total Travel Time: {:.2} h", self.total_travel_time_h)?;
        writeln!(f, "Total Demand Served: {}", self.total_demand)?;
        writeln!(f, "Average Utilization: {:.1}%", self.average_utilization_pct)?;
        write!(f, "Unassigned Stops: {}", self.unassigned_stops)
    }
}

/// Trailing run of ASCII digits of a vehicle id, e.g. `vehicle_12` -> 12.
pub fn numeric_suffix(id: &str) -> Option<u64> {
    let digits = id.len() - id.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    id[id.len() - digits..].parse().ok()
}

/// Order vehicle ids by numeric suffix; ids without one go last, by text.
pub fn compare_vehicle_ids(a: &str, b: &str) -> Ordering {
    match (numeric_suffix(a), numeric_suffix(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
