//! Non-interactive route planning from a JSON catalog.
//!
//! Usage:
//!   airway --catalog socal.json --aircraft "Cessna 172" \
//!          --from KSNA --to KSEE --via SLI --via OCN

use std::path::PathBuf;

use airway_core::{plan_route, Aircraft, Catalog, Itinerary};
use anyhow::{bail, Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan a refueling-feasible route between two airports")]
struct Args {
    /// Path to the JSON catalog of points and aircraft
    #[arg(long)]
    catalog: PathBuf,

    /// Aircraft to fly, as "MAKE MODEL" (must exist in the catalog)
    #[arg(long)]
    aircraft: String,

    /// Departure airport ident
    #[arg(long)]
    from: String,

    /// Arrival airport ident
    #[arg(long)]
    to: String,

    /// Additional waypoint ident; repeat for more, in any order
    #[arg(long)]
    via: Vec<String>,

    /// Emit the itinerary as JSON instead of a report
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.catalog)
        .with_context(|| format!("reading catalog {}", args.catalog.display()))?;
    let catalog: Catalog = serde_json::from_str(&raw)
        .with_context(|| format!("parsing catalog {}", args.catalog.display()))?;

    let Some(aircraft) = catalog.aircraft(&args.aircraft) else {
        bail!("aircraft {:?} is not in the catalog", args.aircraft);
    };

    let via: Vec<&str> = args.via.iter().map(String::as_str).collect();
    let itinerary = plan_route(&catalog, &args.from, &args.to, &via, aircraft)
        .context("planning the route")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&itinerary)?);
    } else {
        print_report(&itinerary, aircraft);
    }
    Ok(())
}

fn print_report(itinerary: &Itinerary, aircraft: &Aircraft) {
    println!(
        "Flight plan for {} ({:.0} km range)",
        aircraft.designation(),
        aircraft.range_km()
    );
    println!();

    for (index, stopover) in itinerary.stopovers.iter().enumerate() {
        println!("{}  {}", stopover.ident, stopover.name);
        for reason in &stopover.reasons {
            println!("   => {reason}");
        }
        if let Some(leg) = itinerary.legs.get(index) {
            println!(
                "   -- {:.1} km, heading {}, {:.2} h -->",
                leg.weight_km,
                leg.heading(),
                leg.time_hours(aircraft)
            );
        }
    }

    println!();
    println!("total distance: {:.1} km", itinerary.total_km);
    println!("total time:     {:.2} h", itinerary.total_hours);
}
