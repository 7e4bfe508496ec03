//! Income Planner CLI
//!
//! Command-line interface for projecting household retirement income

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use income_planner::assets::{AssetSummary, PlanAssets};
use income_planner::form::{store::DEFAULT_STORE_DIR, CLIENT_DATA_KEY, PLAN_INPUTS_KEY};
use income_planner::report::{
    render_schedule_table, render_summary_cards, source_headings, write_schedule_csv,
};
use income_planner::{project, FormSnapshot, Plan, SnapshotStore};

#[derive(Debug, Parser)]
#[command(name = "income_planner", version, about = "Household retirement income projections")]
struct Cli {
    /// Directory holding saved snapshots
    #[arg(long, global = true, env = "INCOME_PLANNER_STORE", default_value = DEFAULT_STORE_DIR)]
    store_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project No Plan, Silver and Gold schedules
    Project {
        #[command(flatten)]
        source: SnapshotSource,

        /// Write one CSV per plan into this directory
        #[arg(long)]
        csv_dir: Option<PathBuf>,

        /// Years to print per schedule
        #[arg(long, default_value_t = 10)]
        rows: usize,
    },
    /// Summarize assets and the allocation under each plan
    Assets {
        #[command(flatten)]
        source: SnapshotSource,
    },
    /// Save a snapshot file into the store
    Save {
        /// Store key, e.g. client_data or plan_inputs
        #[arg(long)]
        key: String,

        /// JSON snapshot to save
        #[arg(long)]
        inputs: PathBuf,
    },
    /// Write an empty snapshot listing every field
    Template {
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Debug, Args)]
struct SnapshotSource {
    /// JSON snapshot file
    #[arg(long, conflicts_with = "key")]
    inputs: Option<PathBuf>,

    /// Store key; defaults to the saved client data merged with plan inputs
    #[arg(long)]
    key: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let store = SnapshotStore::new(&cli.store_dir);

    match cli.command {
        Command::Project { source, csv_dir, rows } => {
            let snapshot = resolve_snapshot(&store, &source)?;
            run_project(&snapshot, csv_dir.as_deref(), rows)
        }
        Command::Assets { source } => {
            let snapshot = resolve_snapshot(&store, &source)?;
            run_assets(&snapshot);
            Ok(())
        }
        Command::Save { key, inputs } => {
            let snapshot = read_snapshot(&inputs)?;
            let saved = store
                .save(&key, &snapshot)
                .with_context(|| format!("saving snapshot {key}"))?;
            println!(
                "Saved {} fields as {} ({})",
                saved.fields.len(),
                key,
                saved.saved_at.format("%Y-%m-%d %H:%M")
            );
            Ok(())
        }
        Command::Template { output } => {
            let file = File::create(&output)
                .with_context(|| format!("creating {}", output.display()))?;
            serde_json::to_writer_pretty(BufWriter::new(file), &FormSnapshot::template())?;
            println!("Template written to {}", output.display());
            Ok(())
        }
    }
}

fn read_snapshot(path: &Path) -> Result<FormSnapshot> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(FormSnapshot::from_json_value(&value))
}

fn resolve_snapshot(store: &SnapshotStore, source: &SnapshotSource) -> Result<FormSnapshot> {
    if let Some(path) = &source.inputs {
        return read_snapshot(path);
    }

    if let Some(key) = &source.key {
        return match store.load(key)? {
            Some(saved) => Ok(saved.fields),
            None => bail!("no snapshot saved under {key} in {}", store.dir().display()),
        };
    }

    let client = store.load(CLIENT_DATA_KEY)?;
    let plan = store.load(PLAN_INPUTS_KEY)?;
    if client.is_none() && plan.is_none() {
        bail!(
            "nothing saved in {}; pass --inputs or run `save` first",
            store.dir().display()
        );
    }

    let client = client.map(|s| s.fields).unwrap_or_default();
    let plan = plan.map(|s| s.fields).unwrap_or_default();
    Ok(client.merged(&plan))
}

fn run_project(snapshot: &FormSnapshot, csv_dir: Option<&Path>, rows: usize) -> Result<()> {
    let inputs = snapshot.to_plan_inputs();
    let result = project(&inputs);

    println!("Income Planner v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");

    if result.years() == 0 {
        println!("Projection years not set; all plans are zero.\n");
    }

    println!("{}", render_summary_cards(&result));
    for schedule in result.iter() {
        println!("{}", render_schedule_table(schedule, rows));
    }

    if let Some(dir) = csv_dir {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        for plan in Plan::ALL {
            let path = dir.join(format!("{}_schedule.csv", plan.key()));
            let file =
                File::create(&path).with_context(|| format!("creating {}", path.display()))?;
            write_schedule_csv(
                result.schedule(plan),
                &source_headings(plan, &inputs),
                BufWriter::new(file),
            )?;
            info!("Wrote {}", path.display());
        }
        println!("Schedules written to: {}", dir.display());
    }

    Ok(())
}

fn run_assets(snapshot: &FormSnapshot) {
    let summary = AssetSummary::from_inputs(&snapshot.to_asset_inputs());
    let inputs = snapshot.to_plan_inputs();

    println!("Assets");
    println!("  Real estate equity: ${:.0}", summary.real_estate_equity);
    println!(
        "  Investments:        ${:.0} ({} accounts, {:.1}%)",
        summary.investments.total, summary.investments.count, summary.investments_pct
    );
    println!(
        "  Savings:            ${:.0} ({} accounts, {:.1}%)",
        summary.savings.total, summary.savings.count, summary.savings_pct
    );
    println!(
        "  Annuities:          ${:.0} ({} accounts, {:.1}%)",
        summary.annuities.total, summary.annuities.count, summary.annuities_pct
    );
    println!("  Financial assets:   ${:.0}", summary.financial_assets);
    println!("  Total assets:       ${:.0}", summary.total_assets);

    println!("\nAllocation by plan:");
    println!("{:<10} {:>14} {:>14} {:>14}", "Plan", "A: Savings", "B: Annuities", "C: Investments");
    let base = summary.base_allocation();
    for plan in Plan::ALL {
        let assets = PlanAssets::for_plan(&base, plan, &inputs);
        println!(
            "{:<10} {:>14.0} {:>14.0} {:>14.0}",
            plan.label(),
            assets.savings,
            assets.annuities,
            assets.investments
        );
    }
}
