//! Per-year household state: ages, survival and growth factors

use crate::household::{HouseholdProfile, IncomeAssumptions};

/// State of the household in one projection year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearState {
    /// Years since the start of the projection (0-indexed)
    pub year_index: u32,

    /// Calendar year number shown to the user (1-indexed)
    pub year: u32,

    /// His attained age (`None` when his track is not modeled)
    pub his_age: Option<u32>,

    /// Her attained age (`None` when her track is not modeled)
    pub her_age: Option<u32>,

    pub his_alive: bool,
    pub her_alive: bool,

    /// Compounded SS growth, 1.0 in the first year
    pub ss_factor: f64,

    /// Compounded pension growth, 1.0 in the first year
    pub pension_factor: f64,

    /// Compounded expense inflation, 1.0 in the first year
    pub expense_factor: f64,
}

impl YearState {
    /// Derive the state for `year_index`
    pub fn at(profile: &HouseholdProfile, income: &IncomeAssumptions, year_index: u32) -> Self {
        let his_age = profile.his_age(year_index);
        let her_age = profile.her_age(year_index);
        let t = year_index as i32;

        Self {
            year_index,
            year: year_index + 1,
            his_age,
            her_age,
            his_alive: his_age.is_some_and(|age| age <= profile.his_death_age),
            her_alive: her_age.is_some_and(|age| age <= profile.her_death_age),
            ss_factor: (1.0 + income.ss_growth_pct).powi(t),
            pension_factor: (1.0 + income.pension_growth_pct).powi(t),
            expense_factor: (1.0 + income.expense_inflation_pct).powi(t),
        }
    }

    pub fn any_alive(&self) -> bool {
        self.his_alive || self.her_alive
    }

    pub fn both_alive(&self) -> bool {
        self.his_alive && self.her_alive
    }

    pub fn both_dead(&self) -> bool {
        !self.any_alive()
    }

    /// The later of the two ages, counting an inert track as 0
    pub fn joint_age(&self) -> u32 {
        self.his_age.unwrap_or(0).max(self.her_age.unwrap_or(0))
    }

    /// Whether either modeled age is past the first death age
    pub fn past_first_death(&self, first_death_age: u32) -> bool {
        [self.his_age, self.her_age]
            .into_iter()
            .flatten()
            .any(|age| age > first_death_age)
    }

    /// Only she is alive
    pub fn her_survives_alone(&self) -> bool {
        self.her_alive && !self.his_alive
    }

    /// Only he is alive
    pub fn his_survives_alone(&self) -> bool {
        self.his_alive && !self.her_alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn income(growth: f64) -> IncomeAssumptions {
        IncomeAssumptions {
            ss_growth_pct: growth,
            pension_growth_pct: growth,
            expense_inflation_pct: growth,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_year_has_no_growth() {
        let profile = HouseholdProfile::new(65, 63, 0, 0, 30);
        let state = YearState::at(&profile, &income(0.03), 0);

        assert_eq!(state.year, 1);
        assert_eq!(state.his_age, Some(65));
        assert_eq!(state.ss_factor, 1.0);
        assert_eq!(state.pension_factor, 1.0);
        assert_eq!(state.expense_factor, 1.0);
    }

    #[test]
    fn test_growth_compounds_from_year_index() {
        let profile = HouseholdProfile::new(65, 63, 0, 0, 30);
        let state = YearState::at(&profile, &income(0.02), 5);

        assert_eq!(state.year, 6);
        assert_relative_eq!(state.ss_factor, 1.02f64.powi(5));
        assert_relative_eq!(state.expense_factor, 1.02f64.powi(5));
    }

    #[test]
    fn test_alive_through_death_age() {
        let profile = HouseholdProfile::new(70, 70, 80, 85, 30);
        let growth = income(0.0);

        let at_death = YearState::at(&profile, &growth, 10);
        assert_eq!(at_death.his_age, Some(80));
        assert!(at_death.his_alive);

        let after = YearState::at(&profile, &growth, 11);
        assert!(!after.his_alive);
        assert!(after.her_alive);
        assert!(after.her_survives_alone());
        assert!(after.past_first_death(profile.first_death_age()));

        let gone = YearState::at(&profile, &growth, 16);
        assert!(gone.both_dead());
    }

    #[test]
    fn test_inert_track_is_never_alive() {
        let profile = HouseholdProfile::new(0, 60, 0, 0, 10);
        let state = YearState::at(&profile, &income(0.0), 0);

        assert_eq!(state.his_age, None);
        assert!(!state.his_alive);
        assert!(state.her_survives_alone());
        assert_eq!(state.joint_age(), 60);
    }
}
