//! Command-line driver: load stops and a fleet, optimize, print the plan.

use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use cvrp_router::config::Config;
use cvrp_router::problem::{Stop, Vehicle};
use cvrp_router::utils::{format_duration, save_report, write_report};
use cvrp_router::RouteOptimizer;

#[derive(Parser, Debug)]
#[command(name = "cvrp-router", version, about = "Capacity-aware route planning from a single depot")]
struct Args {
    /// JSON array of stops: {id, lat, lon, demand, is_depot}
    #[arg(long)]
    stops: PathBuf,

    /// JSON array of vehicles: {id, capacity}. Overrides --vehicles/--capacity
    #[arg(long)]
    fleet: Option<PathBuf>,

    /// Number of identical vehicles to generate
    #[arg(long, default_value_t = 3)]
    vehicles: usize,

    /// Capacity of each generated vehicle
    #[arg(long, default_value_t = 50)]
    capacity: u32,

    /// Cost per kilometer
    #[arg(long, default_value_t = 0.5)]
    cost_per_km: f64,

    /// Average speed in km/h
    #[arg(long, default_value_t = 40.0)]
    speed: f64,

    /// Seed for the annealing solver
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Use only the nearest-neighbor heuristic
    #[arg(long)]
    fast: bool,

    /// Sequence vehicles one after another
    #[arg(long)]
    sequential: bool,

    /// Write the result as JSON to this file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the text report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    info!("Loading stops from: {}", args.stops.display());
    let stops: Vec<Stop> = read_json(&args.stops)?;
    let vehicles: Vec<Vehicle> = match &args.fleet {
        Some(path) => read_json(path)?,
        None => Vehicle::fleet(args.vehicles, args.capacity),
    };

    let config = Config::new()
        .with_cost_per_km(args.cost_per_km)
        .with_average_speed_kmh(args.speed)
        .with_seed(args.seed)
        .with_force_fallback(args.fast)
        .with_parallel(!args.sequential);

    let optimizer = RouteOptimizer::new(config);
    let start_time = Instant::now();
    let result = optimizer.run(&stops, &vehicles)?;
    info!("Search completed in {}", format_duration(start_time.elapsed()));

    let depot_id = stops
        .iter()
        .find(|s| s.is_depot)
        .map_or("depot", |s| s.id.as_str());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&result, depot_id, vehicles.len(), &mut out)?;
    out.flush()?;

    if let Some(path) = &args.report {
        info!("Saving report to: {}", path.display());
        save_report(&result, depot_id, vehicles.len(), path)?;
    }

    if let Some(path) = &args.output {
        info!("Saving result to: {}", path.display());
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &result)?;
        writer.flush()?;
    }

    Ok(())
}
