//! Solves the six-unit, 1263 MW dispatch problem and prints the allocation.
//!
//! Run with `RUST_LOG=u_dispatch=debug` to see per-generation progress.

use tracing_subscriber::EnvFilter;
use u_dispatch::de::DeConfig;
use u_dispatch::dispatch::{solve_with_callback, DispatchProblem};
use u_dispatch::model::DispatchSystem;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let system = DispatchSystem::six_unit_reference();
    let problem = DispatchProblem::new(&system);
    let config = DeConfig::default();

    let solution = solve_with_callback(&problem, &config, |stats| {
        println!(
            "Generation {}: Best Fitness = {:.4}",
            stats.generation, stats.best_fitness
        );
    })?;

    println!();
    println!("Optimal dispatch (MW):");
    for (unit, p) in solution.outputs.iter().enumerate() {
        println!("  unit {}: {:>9.4}", unit + 1, p);
    }
    println!("Total output (MW):     {:.4}", solution.total_output);
    println!("Total fuel cost ($/h): {:.4}", solution.fuel_cost);
    if !solution.meets_demand() {
        println!(
            "Demand missed by {:.6} MW (penalized cost {:.4})",
            solution.demand_mismatch, solution.total_cost
        );
    }
    Ok(())
}
