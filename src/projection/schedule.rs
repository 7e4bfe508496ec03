//! Yearly schedule output for the three plan scenarios

use serde::{Deserialize, Serialize};

use crate::household::SOURCES_PER_PLAN;

/// The three scenarios compared side by side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Plan {
    NoPlan,
    Silver,
    Gold,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::NoPlan, Plan::Silver, Plan::Gold];

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            Plan::NoPlan => "No Plan",
            Plan::Silver => "Silver",
            Plan::Gold => "Gold",
        }
    }

    /// Stable identifier used in field ids, file names and CSV output
    pub fn key(&self) -> &'static str {
        match self {
            Plan::NoPlan => "no_plan",
            Plan::Silver => "silver",
            Plan::Gold => "gold",
        }
    }
}

/// A single row of the schedule for one projection year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    // Timing
    pub year: u32,
    pub his_age: Option<u32>,
    pub her_age: Option<u32>,
    pub his_alive: bool,
    pub her_alive: bool,

    // Base income components
    pub his_ss: f64,
    pub her_ss: f64,
    pub pension1: f64,
    pub pension2: f64,
    pub other_income: f64,

    /// Silver or Gold source payments (all zero for No Plan)
    pub supplemental: [f64; SOURCES_PER_PLAN],

    // Totals
    pub total_income: f64,
    pub expenses: f64,
    /// Income minus expenses; negative is a shortfall
    pub gap: f64,
}

impl ScheduleRow {
    pub fn base_income(&self) -> f64 {
        self.his_ss + self.her_ss + self.pension1 + self.pension2 + self.other_income
    }

    pub fn supplemental_total(&self) -> f64 {
        self.supplemental.iter().sum()
    }
}

/// Headline income/expenses/gap for a plan (its first projected year)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub income: f64,
    pub expenses: f64,
    pub gap: f64,
}

impl PlanSummary {
    pub fn from_row(row: &ScheduleRow) -> Self {
        Self {
            income: row.total_income,
            expenses: row.expenses,
            gap: row.gap,
        }
    }
}

/// Income lines for the plan summary panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanOverview {
    /// First-year expenses
    pub living_today: f64,
    /// First-year income
    pub retirement_income: f64,
    /// Income in the first year she is the only survivor
    pub her_survivor_income: f64,
    /// Income in the first year he is the only survivor
    pub his_survivor_income: f64,
}

/// Complete schedule for one plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSchedule {
    pub plan: Plan,

    /// Yearly rows
    pub rows: Vec<ScheduleRow>,

    /// First-year snapshot (zeroed for an empty schedule)
    pub summary: PlanSummary,
}

impl PlanSchedule {
    pub fn new(plan: Plan) -> Self {
        Self {
            plan,
            rows: Vec::new(),
            summary: PlanSummary::default(),
        }
    }

    /// Add a row; the first row becomes the summary
    pub fn add_row(&mut self, row: ScheduleRow) {
        if self.rows.is_empty() {
            self.summary = PlanSummary::from_row(&row);
        }
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn overview(&self) -> PlanOverview {
        let survivor_income = |pred: fn(&ScheduleRow) -> bool| {
            self.rows
                .iter()
                .find(|r| pred(r))
                .map(|r| r.total_income)
                .unwrap_or(0.0)
        };

        PlanOverview {
            living_today: self.summary.expenses,
            retirement_income: self.summary.income,
            her_survivor_income: survivor_income(|r| r.her_alive && !r.his_alive),
            his_survivor_income: survivor_income(|r| r.his_alive && !r.her_alive),
        }
    }

    pub fn total_income(&self) -> f64 {
        self.rows.iter().map(|r| r.total_income).sum()
    }

    pub fn total_expenses(&self) -> f64 {
        self.rows.iter().map(|r| r.expenses).sum()
    }

    /// Number of years with a shortfall
    pub fn shortfall_years(&self) -> usize {
        self.rows.iter().filter(|r| r.gap < 0.0).count()
    }
}

/// Schedules for all three plans from one projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub no_plan: PlanSchedule,
    pub silver: PlanSchedule,
    pub gold: PlanSchedule,
}

impl ProjectionResult {
    pub fn empty() -> Self {
        Self {
            no_plan: PlanSchedule::new(Plan::NoPlan),
            silver: PlanSchedule::new(Plan::Silver),
            gold: PlanSchedule::new(Plan::Gold),
        }
    }

    pub fn schedule(&self, plan: Plan) -> &PlanSchedule {
        match plan {
            Plan::NoPlan => &self.no_plan,
            Plan::Silver => &self.silver,
            Plan::Gold => &self.gold,
        }
    }

    pub fn schedule_mut(&mut self, plan: Plan) -> &mut PlanSchedule {
        match plan {
            Plan::NoPlan => &mut self.no_plan,
            Plan::Silver => &mut self.silver,
            Plan::Gold => &mut self.gold,
        }
    }

    /// Schedules in display order
    pub fn iter(&self) -> impl Iterator<Item = &PlanSchedule> {
        [&self.no_plan, &self.silver, &self.gold].into_iter()
    }

    pub fn years(&self) -> usize {
        self.no_plan.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: u32, his_alive: bool, her_alive: bool, income: f64, expenses: f64) -> ScheduleRow {
        ScheduleRow {
            year,
            his_age: Some(64 + year),
            her_age: Some(62 + year),
            his_alive,
            her_alive,
            his_ss: income,
            her_ss: 0.0,
            pension1: 0.0,
            pension2: 0.0,
            other_income: 0.0,
            supplemental: [0.0; SOURCES_PER_PLAN],
            total_income: income,
            expenses,
            gap: income - expenses,
        }
    }

    #[test]
    fn test_first_row_becomes_summary() {
        let mut schedule = PlanSchedule::new(Plan::Silver);
        schedule.add_row(row(1, true, true, 50_000.0, 60_000.0));
        schedule.add_row(row(2, true, true, 80_000.0, 61_000.0));

        assert_eq!(schedule.summary.income, 50_000.0);
        assert_eq!(schedule.summary.expenses, 60_000.0);
        assert_eq!(schedule.summary.gap, -10_000.0);
        assert_eq!(schedule.shortfall_years(), 1);
    }

    #[test]
    fn test_overview_finds_first_survivor_years() {
        let mut schedule = PlanSchedule::new(Plan::NoPlan);
        schedule.add_row(row(1, true, true, 70_000.0, 60_000.0));
        schedule.add_row(row(2, false, true, 45_000.0, 61_000.0));
        schedule.add_row(row(3, false, true, 46_000.0, 62_000.0));

        let overview = schedule.overview();
        assert_eq!(overview.living_today, 60_000.0);
        assert_eq!(overview.retirement_income, 70_000.0);
        assert_eq!(overview.her_survivor_income, 45_000.0);
        assert_eq!(overview.his_survivor_income, 0.0);
    }

    #[test]
    fn test_empty_result() {
        let result = ProjectionResult::empty();
        assert_eq!(result.years(), 0);
        for schedule in result.iter() {
            assert_eq!(schedule.summary, PlanSummary::default());
            assert_eq!(schedule.overview(), PlanOverview::default());
        }
    }

    #[test]
    fn test_plan_keys() {
        let keys: Vec<_> = Plan::ALL.iter().map(Plan::key).collect();
        assert_eq!(keys, vec!["no_plan", "silver", "gold"]);
    }
}
