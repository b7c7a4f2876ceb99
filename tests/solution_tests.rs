//! Unit tests for route aggregation, result ordering and fleet summaries.

use std::cmp::Ordering;

use cvrp_router::aggregator::{build_route, travel_time_hours, utilization_pct};
use cvrp_router::config::Config;
use cvrp_router::error::PartialAssignmentWarning;
use cvrp_router::problem::{Stop, Vehicle};
use cvrp_router::sequencer::Tour;
use cvrp_router::solution::{compare_vehicle_ids, numeric_suffix, OptimizationResult, Route};

/// A route with only the fields the summary reads filled in.
fn create_route(vehicle_id: &str, demand: u64, capacity: u32, distance_km: f64) -> Route {
    Route {
        vehicle_id: vehicle_id.to_string(),
        capacity,
        total_demand: demand,
        utilization_pct: utilization_pct(demand, capacity),
        ordered_stop_ids: vec![format!("{}-stop", vehicle_id)],
        distance_m: distance_km * 1000.0,
        distance_km,
        cost: distance_km * 0.5,
        travel_time_h: distance_km / 40.0,
    }
}

#[test]
fn test_utilization_pct() {
    assert_eq!(utilization_pct(10, 20), 50.0);
    assert_eq!(utilization_pct(20, 20), 100.0);
    assert_eq!(utilization_pct(5, 0), 0.0);
}

#[test]
fn test_travel_time_hours() {
    assert_eq!(travel_time_hours(80.0, 40.0), 2.0);
    assert_eq!(travel_time_hours(80.0, 0.0), 0.0);
    assert_eq!(travel_time_hours(80.0, -10.0), 0.0);
}

#[test]
fn test_build_route_metrics() {
    let depot = Stop::depot("depot", 0.0, 0.0);
    let a = Stop::new("a", 0.01, 0.0, 4);
    let b = Stop::new("b", 0.02, 0.0, 6);
    let nodes = vec![&depot, &a, &b];
    let vehicle = Vehicle::new("vehicle_1", 40);
    let config = Config::new()
        .with_cost_per_km(2.0)
        .with_average_speed_kmh(50.0);

    // Visit b before a
    let tour = Tour::new(vec![0, 2, 1], 10_000.0);
    let route = build_route(&vehicle, &nodes, &tour, &config);

    assert_eq!(route.vehicle_id, "vehicle_1");
    assert_eq!(route.capacity, 40);
    assert_eq!(route.ordered_stop_ids, vec!["b", "a"]);
    assert_eq!(route.total_demand, 10);
    assert_eq!(route.utilization_pct, 25.0);
    assert_eq!(route.distance_m, 10_000.0);
    assert_eq!(route.distance_km, 10.0);
    assert_eq!(route.cost, 20.0);
    assert_eq!(route.travel_time_h, 0.2);
    assert_eq!(route.len(), 2);
    assert!(!route.is_empty());
}

#[test]
fn test_numeric_suffix() {
    assert_eq!(numeric_suffix("vehicle_12"), Some(12));
    assert_eq!(numeric_suffix("truck7"), Some(7));
    assert_eq!(numeric_suffix("3"), Some(3));
    assert_eq!(numeric_suffix("van"), None);
    assert_eq!(numeric_suffix(""), None);
}

#[test]
fn test_vehicle_ids_order_numerically() {
    assert_eq!(compare_vehicle_ids("vehicle_2", "vehicle_10"), Ordering::Less);
    assert_eq!(compare_vehicle_ids("vehicle_10", "vehicle_9"), Ordering::Greater);
    assert_eq!(compare_vehicle_ids("vehicle_1", "spare"), Ordering::Less);
    assert_eq!(compare_vehicle_ids("alpha", "beta"), Ordering::Less);
}

#[test]
fn test_result_sorts_routes_by_vehicle_suffix() {
    let routes = vec![
        create_route("vehicle_10", 5, 10, 1.0),
        create_route("spare", 5, 10, 1.0),
        create_route("vehicle_2", 5, 10, 1.0),
        create_route("vehicle_1", 5, 10, 1.0),
    ];
    let result = OptimizationResult::new(routes, None);

    let ids: Vec<&str> = result.routes.iter().map(|r| r.vehicle_id.as_str()).collect();
    assert_eq!(ids, vec!["vehicle_1", "vehicle_2", "vehicle_10", "spare"]);
    assert!(result.route_for("vehicle_2").is_some());
    assert!(result.route_for("vehicle_3").is_none());
}

#[test]
fn test_fleet_summary() {
    let routes = vec![
        create_route("vehicle_1", 8, 10, 12.0),
        create_route("vehicle_2", 4, 10, 8.0),
    ];
    let warning = PartialAssignmentWarning {
        stop_ids: vec!["x".to_string()],
    };
    let result = OptimizationResult::new(routes, Some(warning));

    let summary = result.summary(3);
    assert_eq!(summary.vehicles_used, 2);
    assert_eq!(summary.fleet_size, 3);
    assert!((summary.total_distance_km - 20.0).abs() < 1e-9);
    assert!((summary.total_cost - 10.0).abs() < 1e-9);
    assert!((summary.total_travel_time_h - 0.5).abs() < 1e-9);
    assert_eq!(summary.total_demand, 12);
    assert!((summary.average_utilization_pct - 60.0).abs() < 1e-9);
    assert_eq!(summary.unassigned_stops, 1);
    assert!(summary.is_underutilized());
    assert!((result.total_distance_m() - 20_000.0).abs() < 1e-6);
}

#[test]
fn test_empty_result_is_not_underutilized() {
    let summary = OptimizationResult::new(Vec::new(), None).summary(2);

    assert_eq!(summary.vehicles_used, 0);
    assert_eq!(summary.average_utilization_pct, 0.0);
    assert!(!summary.is_underutilized());
}

#[test]
fn test_warning_lists_stop_ids() {
    let warning = PartialAssignmentWarning {
        stop_ids: vec!["s1".to_string(), "s9".to_string()],
    };

    let text = warning.to_string();
    assert!(text.starts_with("2 stops could not be assigned"));
    assert!(text.contains("s1, s9"));
}
