//! Benchmarks for assignment, sequencing and full optimization runs.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use cvrp_router::assignment::assign_stops;
use cvrp_router::config::Config;
use cvrp_router::distance::DistanceCache;
use cvrp_router::problem::{Problem, Stop, Vehicle};
use cvrp_router::RouteOptimizer;
use std::time::Duration;

/// Depot with `size` stops on concentric delivery rings around it, seven
/// stops per ring, each ring about 1.1 km further out.
fn create_benchmark_stops(size: usize) -> Vec<Stop> {
    let (depot_lat, depot_lon) = (4.65, -74.08);
    let mut stops = vec![Stop::depot("depot", depot_lat, depot_lon)];

    stops.extend((0..size).map(|k| {
        let ring = (k / 7 + 1) as f64;
        let bearing = (k % 7) as f64 * std::f64::consts::TAU / 7.0 + ring * 0.3;
        let lat = depot_lat + 0.01 * ring * bearing.sin();
        let lon = depot_lon + 0.01 * ring * bearing.cos();
        Stop::new(format!("stop_{}", k + 1), lat, lon, 1 + (k % 4) as u32)
    }));

    stops
}

fn create_benchmark_fleet(size: usize) -> Vec<Vehicle> {
    Vehicle::fleet((size / 10).max(1), 25)
}

fn benchmark_assignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("assignment");

    for size in [50, 100, 200].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let stops = create_benchmark_stops(size);
            let vehicles = create_benchmark_fleet(size);
            let problem = Problem::new(&stops, &vehicles).unwrap();

            b.iter(|| {
                let distances = DistanceCache::new();
                assign_stops(&problem, &distances)
            });
        });
    }

    group.finish();
}

fn benchmark_fallback_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("fallback_run");

    for size in [50, 100, 200].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let stops = create_benchmark_stops(size);
            let vehicles = create_benchmark_fleet(size);
            let config = Config::new().with_force_fallback(true);

            b.iter(|| RouteOptimizer::new(config.clone()).run(&stops, &vehicles));
        });
    }

    group.finish();
}

fn benchmark_annealing_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("annealing_run");
    group.measurement_time(Duration::from_secs(30));

    for size in [50, 100].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let stops = create_benchmark_stops(size);
            let vehicles = create_benchmark_fleet(size);
            let config = Config::new().with_seed(42);

            b.iter(|| RouteOptimizer::new(config.clone()).run(&stops, &vehicles));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_assignment,
    benchmark_fallback_run,
    benchmark_annealing_run
);
criterion_main!(benches);
