//! Fission Planner - CLI entry point
//!
//! Builds a small demonstration layout (or loads a rule file first) and
//! prints the computed statistics and resource costs, exercising the same
//! pipeline the editor UI reads from.

use clap::Parser;
use std::fs;
use std::path::PathBuf;

use fission_planner::core::error::Result;
use fission_planner::core::types::{Dims, Position};
use fission_planner::planner::ReactorPlanner;
use fission_planner::rules::load_rule_set;

#[derive(Parser)]
#[command(name = "fission-planner", about = "Score a demo reactor layout")]
struct Args {
    /// Interior size along each axis
    #[arg(long, default_value_t = 5)]
    size: u32,

    /// Fuel archetype for the central cell
    #[arg(long, default_value = "[OX]LECf-249")]
    fuel: String,

    /// Optional rule file (JSON) replacing the built-in defaults
    #[arg(long)]
    rules: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("fission_planner=debug")
        .init();

    let args = Args::parse();
    let dims = Dims::new(args.size, args.size, args.size);

    let mut planner = if let Some(path) = &args.rules {
        let json = fs::read_to_string(path)?;
        let rules = load_rule_set(&json)?;
        ReactorPlanner::with_rules(dims, rules)
    } else {
        ReactorPlanner::new(dims)
    };

    build_demo_layout(&mut planner, &args.fuel)?;

    let stats = planner.stats().clone();
    println!("=== Reactor statistics ({0}x{0}x{0}) ===", args.size);
    println!("fuel cells:      {} ({} active)", stats.fuel_cells, stats.active_fuel_cells);
    println!("raw power:       {:.1}", stats.total_power);
    println!("effective power: {:.1}", stats.effective_power);
    println!("heat generated:  {:.1}", stats.total_heat);
    println!("heat dissipated: {:.1}", stats.total_cooling);
    println!(
        "penalties:       sparsity x{:.3}, cooling x{:.3}",
        stats.sparsity_multiplier, stats.cooling_multiplier
    );
    println!("valid:           {}", stats.valid);
    for issue in &stats.issues {
        println!("  issue: {issue:?}");
    }

    let mut costs: Vec<(String, u64)> = planner.resource_costs().into_iter().collect();
    costs.sort();
    println!("=== Resource costs ===");
    for (resource, quantity) in costs {
        println!("{quantity:>6} x {resource}");
    }

    Ok(())
}

/// Central fuel cell, a neutron source beside it, and a cooled sink line
/// out to the casing wall
fn build_demo_layout(planner: &mut ReactorPlanner, fuel: &str) -> Result<()> {
    let dims = planner.grid().dims();
    let c = (dims.x / 2) as i32;
    let center = Position::new(c, c, c);

    planner.place(center, fuel)?;

    let source = Position::new(c - 1, c, c);
    if dims.contains(source) {
        planner.place(source, "Cf-252")?;
    }
    let sink = Position::new(c + 1, c, c);
    if dims.contains(sink) {
        planner.place(sink, "Water")?;
    }
    for x in (c + 2)..(dims.x as i32) {
        planner.place(Position::new(x, c, c), "Conductor")?;
    }
    Ok(())
}
