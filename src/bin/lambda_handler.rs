//! AWS Lambda handler for running household projections
//!
//! Accepts a flat form snapshot as JSON and returns summary cards, survivor
//! income, asset allocation and the yearly schedules for all three plans.
//!
//! Function URL / API Gateway events are supported: when the payload has a
//! string `body`, that body is parsed as the snapshot.

use std::time::Instant;

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::info;
use serde::Serialize;
use serde_json::Value;

use income_planner::projection::PlanOverview;
use income_planner::{
    project, AssetSummary, FormSnapshot, Plan, PlanAssets, PlanSummary, ProjectionResult,
};

/// Request flag that drops the yearly rows from the response
const SUMMARY_ONLY_FIELD: &str = "summary_only";

/// Headline numbers for one plan
#[derive(Debug, Serialize)]
pub struct PlanCard {
    pub plan: Plan,
    pub summary: PlanSummary,
    pub overview: PlanOverview,
    pub assets: PlanAssets,
}

/// Output from the projection
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub projection_years: usize,
    pub cards: Vec<PlanCard>,
    pub assets: AssetSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedules: Option<ProjectionResult>,
    pub execution_time_ms: u64,
}

/// Unwrap an HTTP-style event into the snapshot object
fn snapshot_payload(payload: Value) -> Result<Value, Error> {
    if let Some(Value::String(body)) = payload.get("body") {
        return Ok(serde_json::from_str(body)?);
    }
    Ok(payload)
}

async fn handler(event: LambdaEvent<Value>) -> Result<PlanResponse, Error> {
    let start = Instant::now();

    let payload = snapshot_payload(event.payload)?;
    let summary_only = payload
        .get(SUMMARY_ONLY_FIELD)
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let snapshot = FormSnapshot::from_json_value(&payload);

    let inputs = snapshot.to_plan_inputs();
    let result = project(&inputs);

    let assets = AssetSummary::from_inputs(&snapshot.to_asset_inputs());
    let base = assets.base_allocation();

    let cards = Plan::ALL
        .iter()
        .map(|&plan| {
            let schedule = result.schedule(plan);
            PlanCard {
                plan,
                summary: schedule.summary,
                overview: schedule.overview(),
                assets: PlanAssets::for_plan(&base, plan, &inputs),
            }
        })
        .collect();

    let execution_time_ms = start.elapsed().as_millis() as u64;
    info!(
        "Projected {} years in {} ms",
        result.years(),
        execution_time_ms
    );

    Ok(PlanResponse {
        projection_years: result.years(),
        cards,
        assets,
        schedules: (!summary_only).then_some(result),
        execution_time_ms,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
