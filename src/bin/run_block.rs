//! Run projections for a block of households from a CSV file
//!
//! Outputs one summary line per household and plan

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use income_planner::household::load_households;
use income_planner::report::write_summary_csv;
use income_planner::{Plan, ScenarioRunner};

#[derive(Debug, Parser)]
#[command(name = "run_block", about = "Project every household in a CSV file")]
struct Cli {
    /// Households CSV (form field ids as headers plus household_id)
    #[arg(long, default_value = "households.csv")]
    households: PathBuf,

    /// Summary output CSV
    #[arg(long, default_value = "block_summary.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    println!("Loading households from {}...", cli.households.display());

    let households = load_households(&cli.households)
        .with_context(|| format!("loading {}", cli.households.display()))?;
    println!("Loaded {} households in {:?}", households.len(), start.elapsed());

    println!("Running projections...");
    let proj_start = Instant::now();
    let runner = ScenarioRunner::new();
    let projections = runner.run_batch(&households);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let file = File::create(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    write_summary_csv(&projections, BufWriter::new(file))?;
    println!("Output written to {}", cli.output.display());

    // Block summary
    println!("\nBlock Summary (first-year totals):");
    for plan in Plan::ALL {
        let (income, expenses, shortfalls) = projections.iter().fold(
            (0.0, 0.0, 0usize),
            |(income, expenses, shortfalls), p| {
                let summary = p.result.schedule(plan).summary;
                (
                    income + summary.income,
                    expenses + summary.expenses,
                    shortfalls + usize::from(summary.gap < 0.0),
                )
            },
        );
        println!(
            "  {:<8} Income=${:.0}, Expenses=${:.0}, Households with a gap: {}",
            plan.label(),
            income,
            expenses,
            shortfalls
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
