//! Reporting helpers for optimization results.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crate::solution::OptimizationResult;

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Write a plain-text report of a result.
pub fn write_report<W: Write>(
    result: &OptimizationResult,
    depot_id: &str,
    fleet_size: usize,
    out: &mut W,
) -> io::Result<()> {
    let summary = result.summary(fleet_size);

    writeln!(out, "Route Plan")?;
    writeln!(out, "{}", summary)?;
    if summary.is_underutilized() {
        writeln!(
            out,
            "Note: fleet looks under-used; consider smaller vehicles or consolidating routes."
        )?;
    }
    if let Some(warning) = &result.unassigned {
        writeln!(out, "Warning: {}", warning)?;
    }
    writeln!(out)?;

    for route in &result.routes {
        writeln!(out, "Route for {}:", route.vehicle_id)?;

        write!(out, "  {}", depot_id)?;
        for stop in &route.ordered_stop_ids {
            write!(out, " -> {}", stop)?;
        }
        writeln!(out, " -> {}", depot_id)?;

        writeln!(
            out,
            "  Load: {} / {} ({:.2}%)",
            route.total_demand, route.capacity, route.utilization_pct
        )?;
        writeln!(out, "  Distance: {:.2} km", route.distance_km)?;
        writeln!(out, "  Cost: {:.2}", route.cost)?;
        writeln!(out, "  Travel Time: {:.2} h", route.travel_time_h)?;
        writeln!(out)?;
    }

    Ok(())
}

/// Save a plain-text report to a file.
pub fn save_report<P: AsRef<Path>>(
    result: &OptimizationResult,
    depot_id: &str,
    fleet_size: usize,
    path: P,
) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write_report(result, depot_id, fleet_size, &mut file)?;
    file.flush()
}
