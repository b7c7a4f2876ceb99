//! Problem definition and data structures for single-depot CVRP.

use serde::{Deserialize, Serialize};

use crate::error::OptimizationError;

/// A point on the Earth's surface, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Create a new coordinate.
    pub fn new(lat: f64, lon: f64) -> Self {
        Coordinate { lat, lon }
    }
}

/// A demand point (or the depot) to be routed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub demand: u32,
    #[serde(default)]
    pub is_depot: bool,
}

impl Stop {
    /// Create a new client stop.
    pub fn new(id: impl Into<String>, lat: f64, lon: f64, demand: u32) -> Self {
        Stop {
            id: id.into(),
            lat,
            lon,
            demand,
            is_depot: false,
        }
    }

    /// Create the depot stop. Depots carry no demand.
    pub fn depot(id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Stop {
            id: id.into(),
            lat,
            lon,
            demand: 0,
            is_depot: true,
        }
    }

    /// The position of this stop.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

/// A capacity-limited vehicle of the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub capacity: u32,
}

impl Vehicle {
    /// Create a new vehicle.
    pub fn new(id: impl Into<String>, capacity: u32) -> Self {
        Vehicle {
            id: id.into(),
            capacity,
        }
    }

    /// Build a homogeneous fleet with ids `vehicle_1` .. `vehicle_{count}`.
    pub fn fleet(count: usize, capacity: u32) -> Vec<Vehicle> {
        (1..=count)
            .map(|i| Vehicle::new(format!("vehicle_{}", i), capacity))
            .collect()
    }
}

/// A validated routing instance: one depot, at least one client, a fleet
/// whose total capacity covers the total client demand.
#[derive(Debug, Clone)]
pub struct Problem {
    pub depot: Stop,
    pub clients: Vec<Stop>,
    pub vehicles: Vec<Vehicle>,
}

impl Problem {
    /// Check the structural preconditions of a run and build the problem.
    ///
    /// The checks run in a fixed order (depot, empty input, capacity) so the
    /// first violated precondition is the one reported.
    pub fn new(stops: &[Stop], vehicles: &[Vehicle]) -> Result<Self, OptimizationError> {
        let mut depots = stops.iter().filter(|s| s.is_depot);
        let depot = match (depots.next(), depots.next()) {
            (Some(depot), None) => depot.clone(),
            _ => {
                return Err(OptimizationError::Configuration {
                    depots: stops.iter().filter(|s| s.is_depot).count(),
                })
            }
        };

        let clients: Vec<Stop> = stops.iter().filter(|s| !s.is_depot).cloned().collect();
        if clients.is_empty() {
            return Err(OptimizationError::EmptyInput);
        }

        let problem = Problem {
            depot,
            clients,
            vehicles: vehicles.to_vec(),
        };

        let demand = problem.total_demand();
        let capacity = problem.total_capacity();
        if demand > capacity {
            return Err(OptimizationError::CapacityInfeasible { demand, capacity });
        }

        Ok(problem)
    }

    /// Sum of all client demand.
    pub fn total_demand(&self) -> u64 {
        self.clients.iter().map(|s| u64::from(s.demand)).sum()
    }

    /// Sum of all vehicle capacities.
    pub fn total_capacity(&self) -> u64 {
        self.vehicles.iter().map(|v| u64::from(v.capacity)).sum()
    }

    /// Get the number of clients (excluding the depot).
    pub fn get_client_count(&self) -> usize {
        self.clients.len()
    }
}
