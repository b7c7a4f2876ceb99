//! Greedy capacity-aware clustering of client stops onto vehicles.

use std::cmp::Reverse;

use crate::distance::DistanceCache;
use crate::problem::{Coordinate, Problem};

/// Stops assigned to one vehicle, as indices into `Problem::clients`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleAssignment {
    /// Index into `Problem::vehicles`
    pub vehicle: usize,
    /// Client indices in the order they were picked
    pub stops: Vec<usize>,
    /// Total demand of the assigned stops
    pub load: u64,
}

impl VehicleAssignment {
    /// Check if nothing was assigned to this vehicle.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// Result of the assignment pass. One entry per vehicle, in fleet order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub vehicles: Vec<VehicleAssignment>,
    /// Client indices that fit in no vehicle, in pending order
    pub unassigned: Vec<usize>,
}

/// Partition the clients of `problem` across its vehicles.
///
/// Pending stops are ordered by demand, largest first (stable on input
/// order). Each vehicle, in fleet order, starts at the depot and repeatedly
/// takes the closest pending stop that still fits its remaining capacity,
/// moving its position to that stop. Vehicles are filled once; whatever is
/// left afterwards is unassigned. Capacity left over on earlier vehicles is
/// never revisited.
pub fn assign_stops(problem: &Problem, distances: &DistanceCache) -> Assignment {
    let mut pending: Vec<usize> = (0..problem.clients.len()).collect();
    pending.sort_by_key(|&i| Reverse(problem.clients[i].demand));

    let depot = problem.depot.coordinate();
    let mut vehicles = Vec::with_capacity(problem.vehicles.len());

    for (v_idx, vehicle) in problem.vehicles.iter().enumerate() {
        let mut remaining = u64::from(vehicle.capacity);
        let mut position = depot;
        let mut assigned = VehicleAssignment {
            vehicle: v_idx,
            stops: Vec::new(),
            load: 0,
        };

        while let Some(slot) = closest_fitting(problem, &pending, position, remaining, distances)
        {
            let client = pending.remove(slot);
            let stop = &problem.clients[client];

            remaining -= u64::from(stop.demand);
            assigned.load += u64::from(stop.demand);
            assigned.stops.push(client);
            position = stop.coordinate();
        }

        vehicles.push(assigned);
    }

    Assignment {
        vehicles,
        unassigned: pending,
    }
}

/// Position in `pending` of the nearest stop whose demand fits `remaining`.
/// Ties keep the earliest pending stop.
fn closest_fitting(
    problem: &Problem,
    pending: &[usize],
    position: Coordinate,
    remaining: u64,
    distances: &DistanceCache,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (slot, &client) in pending.iter().enumerate() {
        let stop = &problem.clients[client];
        if u64::from(stop.demand) > remaining {
            continue;
        }

        let d = distances.distance(position, stop.coordinate());
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((slot, d));
        }
    }

    best.map(|(slot, _)| slot)
}
