//! Scenario runner for single, batch and what-if projections

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::household::{HouseholdRecord, PlanInputs};
use crate::projection::{ProjectionEngine, ProjectionResult};

/// Projection of one household in a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdProjection {
    pub household_id: u32,
    pub result: ProjectionResult,
}

/// Result of one what-if variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflationVariant {
    pub expense_inflation_pct: f64,
    pub result: ProjectionResult,
}

/// Runs projections; holds no state between runs
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let households = load_households("households.csv")?;
/// let results = runner.run_batch(&households);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner;

impl ScenarioRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run a single projection
    pub fn run(&self, inputs: &PlanInputs) -> ProjectionResult {
        ProjectionEngine::new(inputs.clone()).project()
    }

    /// Project many households in parallel; output order matches input order
    pub fn run_batch(&self, households: &[HouseholdRecord]) -> Vec<HouseholdProjection> {
        let projections: Vec<HouseholdProjection> = households
            .par_iter()
            .map(|household| HouseholdProjection {
                household_id: household.household_id,
                result: self.run(&household.inputs),
            })
            .collect();

        info!("Projected {} households", projections.len());
        projections
    }

    /// Re-run one household under different expense inflation rates
    pub fn run_variants(&self, inputs: &PlanInputs, inflation_rates: &[f64]) -> Vec<InflationVariant> {
        inflation_rates
            .iter()
            .map(|&rate| {
                let mut variant = inputs.clone();
                variant.income.expense_inflation_pct = rate;
                InflationVariant {
                    expense_inflation_pct: rate,
                    result: self.run(&variant),
                }
            })
            .collect()
    }
}
