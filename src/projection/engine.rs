//! Core projection engine for yearly household income projections

use log::{debug, warn};

use super::income::{
    other_income, pension_payment, social_security, supplemental_income, PensionTerms,
};
use super::schedule::{Plan, ProjectionResult, ScheduleRow};
use super::state::YearState;
use crate::household::{PlanInputs, SupplementalSource, MAX_PROJECTION_YEARS, SOURCES_PER_PLAN};

/// Income common to all three plans for one year
#[derive(Debug, Clone, Copy)]
struct BaseYear {
    his_ss: f64,
    her_ss: f64,
    pension1: f64,
    pension2: f64,
    other_income: f64,
    expenses: f64,
}

impl BaseYear {
    fn income(&self) -> f64 {
        self.his_ss + self.her_ss + self.pension1 + self.pension2 + self.other_income
    }
}

/// Main projection engine
///
/// Stateless: every call to [`ProjectionEngine::project`] recomputes the full
/// horizon from the inputs.
pub struct ProjectionEngine {
    inputs: PlanInputs,
}

impl ProjectionEngine {
    pub fn new(inputs: PlanInputs) -> Self {
        Self { inputs }
    }

    pub fn inputs(&self) -> &PlanInputs {
        &self.inputs
    }

    /// Run the projection for No Plan, Silver and Gold
    pub fn project(&self) -> ProjectionResult {
        let profile = &self.inputs.profile;
        let mut result = ProjectionResult::empty();

        if profile.projection_years <= 0 {
            warn!(
                "Projection horizon is {} years; returning empty schedules",
                profile.projection_years
            );
            return result;
        }

        if profile.horizon_clamped() {
            warn!(
                "Projection horizon of {} years exceeds the {}-year limit; projecting {} years",
                profile.projection_years,
                MAX_PROJECTION_YEARS,
                profile.horizon()
            );
        }

        debug!(
            "Projecting {} years (his age {}, her age {}, death ages {}/{})",
            profile.projection_years,
            profile.his_current_age,
            profile.her_current_age,
            profile.his_death_age,
            profile.her_death_age,
        );

        for year_index in 0..profile.horizon() {
            let state = YearState::at(profile, &self.inputs.income, year_index);
            let base = self.calculate_base_year(&state);

            for plan in Plan::ALL {
                let row = self.build_row(plan, &state, &base);
                result.schedule_mut(plan).add_row(row);
            }
        }

        result
    }

    /// SS, pensions, other income and expenses for the year
    fn calculate_base_year(&self, state: &YearState) -> BaseYear {
        let profile = &self.inputs.profile;
        let income = &self.inputs.income;
        let first_death_age = profile.first_death_age();

        let ss = social_security(profile, income, state);

        let pension1 = pension_payment(
            &PensionTerms::his(profile, income),
            state.his_age,
            first_death_age,
            state,
        );
        let pension2 = pension_payment(
            &PensionTerms::her(profile, income),
            state.her_age,
            first_death_age,
            state,
        );

        BaseYear {
            his_ss: ss.his,
            her_ss: ss.her,
            pension1,
            pension2,
            other_income: other_income(income, state),
            expenses: income.living_expenses_annual * state.expense_factor,
        }
    }

    fn sources(&self, plan: Plan) -> Option<&[SupplementalSource; SOURCES_PER_PLAN]> {
        match plan {
            Plan::NoPlan => None,
            Plan::Silver => Some(&self.inputs.silver),
            Plan::Gold => Some(&self.inputs.gold),
        }
    }

    fn build_row(&self, plan: Plan, state: &YearState, base: &BaseYear) -> ScheduleRow {
        let supplemental = match self.sources(plan) {
            Some(sources) => sources.each_ref().map(|s| supplemental_income(s, state)),
            None => [0.0; SOURCES_PER_PLAN],
        };

        let total_income = base.income() + supplemental.iter().sum::<f64>();

        ScheduleRow {
            year: state.year,
            his_age: state.his_age,
            her_age: state.her_age,
            his_alive: state.his_alive,
            her_alive: state.her_alive,
            his_ss: base.his_ss,
            her_ss: base.her_ss,
            pension1: base.pension1,
            pension2: base.pension2,
            other_income: base.other_income,
            supplemental,
            total_income,
            expenses: base.expenses,
            gap: total_income - base.expenses,
        }
    }
}

/// Project all three plans for one input bundle
pub fn project(inputs: &PlanInputs) -> ProjectionResult {
    ProjectionEngine::new(inputs.clone()).project()
}
