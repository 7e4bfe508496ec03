//! Schedule and summary output: CSV export and console tables

use std::io::Write;

use csv::Writer;

use crate::error::Result;
use crate::household::{PlanInputs, SOURCES_PER_PLAN};
use crate::projection::{Plan, PlanSchedule, ProjectionResult};
use crate::scenario::HouseholdProjection;

/// Column headings of the supplemental sources for a plan
pub fn source_headings(plan: Plan, inputs: &PlanInputs) -> Vec<String> {
    match plan {
        Plan::NoPlan => Vec::new(),
        Plan::Silver => inputs.silver.iter().map(|s| s.description.clone()).collect(),
        Plan::Gold => inputs.gold.iter().map(|s| s.description.clone()).collect(),
    }
}

fn age_cell(age: Option<u32>) -> String {
    age.map(|a| a.to_string()).unwrap_or_default()
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

/// Write one plan's schedule as CSV.
///
/// Silver and Gold schedules carry one column per supplemental source, named
/// by `headings` (falling back to "Source N").
pub fn write_schedule_csv<W: Write>(
    schedule: &PlanSchedule,
    headings: &[String],
    writer: W,
) -> Result<()> {
    let mut csv = Writer::from_writer(writer);
    let with_sources = schedule.plan != Plan::NoPlan;

    let mut header: Vec<String> = [
        "Year", "HisAge", "HerAge", "HisSS", "HerSS", "Pension1", "Pension2", "Other",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    if with_sources {
        for slot in 0..SOURCES_PER_PLAN {
            header.push(
                headings
                    .get(slot)
                    .filter(|h| !h.trim().is_empty())
                    .cloned()
                    .unwrap_or_else(|| format!("Source {}", slot + 1)),
            );
        }
    }
    header.extend(["TotalIncome", "Expenses", "Gap"].iter().map(|s| s.to_string()));
    csv.write_record(&header)?;

    for row in &schedule.rows {
        let mut record = vec![
            row.year.to_string(),
            age_cell(row.his_age),
            age_cell(row.her_age),
            money(row.his_ss),
            money(row.her_ss),
            money(row.pension1),
            money(row.pension2),
            money(row.other_income),
        ];
        if with_sources {
            record.extend(row.supplemental.iter().map(|&v| money(v)));
        }
        record.push(money(row.total_income));
        record.push(money(row.expenses));
        record.push(money(row.gap));
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write one summary line per household and plan
pub fn write_summary_csv<W: Write>(projections: &[HouseholdProjection], writer: W) -> Result<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record([
        "HouseholdId",
        "Plan",
        "Years",
        "FirstYearIncome",
        "FirstYearExpenses",
        "FirstYearGap",
        "HerSurvivorIncome",
        "HisSurvivorIncome",
        "TotalIncome",
        "TotalExpenses",
        "ShortfallYears",
    ])?;

    for projection in projections {
        for schedule in projection.result.iter() {
            let overview = schedule.overview();
            csv.write_record([
                projection.household_id.to_string(),
                schedule.plan.key().to_string(),
                schedule.rows.len().to_string(),
                money(schedule.summary.income),
                money(schedule.summary.expenses),
                money(schedule.summary.gap),
                money(overview.her_survivor_income),
                money(overview.his_survivor_income),
                money(schedule.total_income()),
                money(schedule.total_expenses()),
                schedule.shortfall_years().to_string(),
            ])?;
        }
    }

    csv.flush()?;
    Ok(())
}

/// Fixed-width table of the first `max_rows` years of a schedule
pub fn render_schedule_table(schedule: &PlanSchedule, max_rows: usize) -> String {
    let with_sources = schedule.plan != Plan::NoPlan;
    let mut out = format!(
        "{} schedule ({} years):\n",
        schedule.plan.label(),
        schedule.rows.len()
    );

    out.push_str(&format!(
        "{:>4} {:>4} {:>4} {:>10} {:>10} {:>10} {:>10} {:>9}",
        "Yr", "His", "Her", "HisSS", "HerSS", "Pension1", "Pension2", "Other"
    ));
    if with_sources {
        out.push_str(&format!(" {:>10}", "Added"));
    }
    out.push_str(&format!(" {:>11} {:>11} {:>11}\n", "Income", "Expenses", "Gap"));
    out.push_str(&"-".repeat(if with_sources { 123 } else { 112 }));
    out.push('\n');

    for row in schedule.rows.iter().take(max_rows) {
        out.push_str(&format!(
            "{:>4} {:>4} {:>4} {:>10.0} {:>10.0} {:>10.0} {:>10.0} {:>9.0}",
            row.year,
            age_cell(row.his_age),
            age_cell(row.her_age),
            row.his_ss,
            row.her_ss,
            row.pension1,
            row.pension2,
            row.other_income,
        ));
        if with_sources {
            out.push_str(&format!(" {:>10.0}", row.supplemental_total()));
        }
        out.push_str(&format!(
            " {:>11.0} {:>11.0} {:>11.0}\n",
            row.total_income, row.expenses, row.gap
        ));
    }

    if schedule.rows.len() > max_rows {
        out.push_str(&format!("... ({} more years)\n", schedule.rows.len() - max_rows));
    }

    out
}

/// Side-by-side summary cards and survivor lines for the three plans
pub fn render_summary_cards(result: &ProjectionResult) -> String {
    let mut out = format!(
        "{:<10} {:>12} {:>12} {:>12} {:>14} {:>14}\n",
        "Plan", "Income", "Expenses", "Gap", "Her survivor", "His survivor"
    );
    out.push_str(&"-".repeat(79));
    out.push('\n');

    for schedule in result.iter() {
        let overview = schedule.overview();
        let marker = if schedule.summary.gap < 0.0 { " (shortfall)" } else { "" };
        out.push_str(&format!(
            "{:<10} {:>12.0} {:>12.0} {:>12.0} {:>14.0} {:>14.0}{}\n",
            schedule.plan.label(),
            schedule.summary.income,
            schedule.summary.expenses,
            schedule.summary.gap,
            overview.her_survivor_income,
            overview.his_survivor_income,
            marker,
        ));
    }

    out
}
