use std::env;
use std::error::Error;
use std::path::Path;

use colored::Colorize;
use csv::Writer;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fastship_router::config::constant::{LOCATION_COUNT, SEED};
use fastship_router::config::SolverParams;
use fastship_router::fixtures::data_generator::{generate_random_locations, load_locations_csv};
use fastship_router::pipeline::optimize::optimize_route;
use fastship_router::pipeline::plan::RoutePlan;

/// Initialize tracing with an env-filtered fmt layer.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    // INPUT: a CSV path argument, or the seeded fixture set
    let locations = match env::args().nth(1) {
        Some(path) => load_locations_csv(Path::new(&path))?,
        None => generate_random_locations(LOCATION_COUNT, SEED),
    };
    if locations.len() < 2 {
        return Err("need at least two locations to route between".into());
    }
    info!("optimizing over {} locations", locations.len());

    let start_idx = 0;
    let end_idx = locations.len() - 1;

    let plan = optimize_route(
        &locations,
        start_idx,
        end_idx,
        None,
        &SolverParams::default(),
        SEED,
    )?;

    print_plan(&plan);
    save_stops_csv(&plan, "route.csv")?;
    println!("\n{}", serde_json::to_string_pretty(&plan)?);

    Ok(())
}

fn print_plan(plan: &RoutePlan) {
    println!("{}", "OPTIMIZED ROUTE".bold());
    println!(
        "{} , {}",
        format_args!("Distance: {:.2} km", plan.total_distance_km)
            .to_string()
            .green(),
        format_args!("ETA: {}", plan.estimated_time)
    );

    for (order, stop) in plan.stops.iter().enumerate() {
        println!("{:>3}. {} ({})", order + 1, stop.name, stop.address);
    }

    if let Some(comparison) = &plan.comparison {
        let line = format!(
            "GA: {:.2} km | ACO: {:.2} km | improvement: {:.2} km ({:.1}%)",
            comparison.ga.total_distance_km,
            comparison.aco.total_distance_km,
            comparison.improvement.distance_km,
            comparison.improvement.percentage,
        );
        if comparison.improvement.distance_km >= 0.0 {
            println!("{}", line.green());
        } else {
            println!("{}", line.red());
        }
    }
}

fn save_stops_csv(plan: &RoutePlan, filename: &str) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filename)?;

    wtr.write_record(["order", "id", "name", "longitude", "latitude"])?;
    for (order, stop) in plan.stops.iter().enumerate() {
        wtr.write_record([
            (order + 1).to_string(),
            stop.id.clone(),
            stop.name.clone(),
            stop.coordinates[0].to_string(),
            stop.coordinates[1].to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
