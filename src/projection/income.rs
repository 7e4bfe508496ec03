//! Income stream rules: Social Security survivor step-up, pension survivor
//! percentages and supplemental source activation

use super::state::YearState;
use crate::household::{
    start_age_or_current, HouseholdProfile, IncomeAssumptions, Owner, SupplementalSource,
};

/// Social Security paid to each spouse in one year
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SocialSecurity {
    pub his: f64,
    pub her: f64,
}

/// Resolve both SS benefits for the year.
///
/// While both live each draws their own benefit from their own start age.
/// A lone survivor keeps the higher of the two base benefits: their own if it
/// was higher, otherwise the deceased spouse's amount, gated by the deceased
/// spouse's start age against the survivor's age.
pub fn social_security(
    profile: &HouseholdProfile,
    income: &IncomeAssumptions,
    state: &YearState,
) -> SocialSecurity {
    let his_start = start_age_or_current(income.his_ss_start_age, profile.his_current_age);
    let her_start = start_age_or_current(income.her_ss_start_age, profile.her_current_age);
    let his_benefit = income.his_ss_annual * state.ss_factor;
    let her_benefit = income.her_ss_annual * state.ss_factor;
    let reached = |age: Option<u32>, start: u32| age.is_some_and(|a| a >= start);

    let mut ss = SocialSecurity::default();

    if state.both_alive() {
        if reached(state.his_age, his_start) {
            ss.his = his_benefit;
        }
        if reached(state.her_age, her_start) {
            ss.her = her_benefit;
        }
    } else if state.his_survives_alone() {
        let (benefit, start) = if income.ss_high_is_his() {
            (his_benefit, his_start)
        } else {
            (her_benefit, her_start)
        };
        if reached(state.his_age, start) {
            ss.his = benefit;
        }
    } else if state.her_survives_alone() {
        let (benefit, start) = if income.ss_high_is_his() {
            (his_benefit, his_start)
        } else {
            (her_benefit, her_start)
        };
        if reached(state.her_age, start) {
            ss.her = benefit;
        }
    }

    ss
}

/// Terms of one pension, keyed to its owner's age track
#[derive(Debug, Clone, Copy)]
pub struct PensionTerms {
    pub annual: f64,
    pub start_age: u32,
    pub survivor_factor: f64,
}

impl PensionTerms {
    /// Pension 1 follows his age
    pub fn his(profile: &HouseholdProfile, income: &IncomeAssumptions) -> Self {
        Self {
            annual: income.pension1_annual,
            start_age: start_age_or_current(income.pension1_start_age, profile.his_current_age),
            survivor_factor: income.pension1_survivor_factor(),
        }
    }

    /// Pension 2 follows her age
    pub fn her(profile: &HouseholdProfile, income: &IncomeAssumptions) -> Self {
        Self {
            annual: income.pension2_annual,
            start_age: start_age_or_current(income.pension2_start_age, profile.her_current_age),
            survivor_factor: income.pension2_survivor_factor(),
        }
    }
}

/// Pension paid in one year.
///
/// Pays the compounded amount once the owner reaches the start age and while
/// anyone is alive. After the first death the survivor factor applies for
/// every remaining year.
pub fn pension_payment(
    terms: &PensionTerms,
    owner_age: Option<u32>,
    first_death_age: u32,
    state: &YearState,
) -> f64 {
    if !state.any_alive() || terms.annual == 0.0 {
        return 0.0;
    }
    let Some(age) = owner_age else {
        return 0.0;
    };
    if age < terms.start_age {
        return 0.0;
    }

    let amount = terms.annual * state.pension_factor;
    if state.past_first_death(first_death_age) {
        amount * terms.survivor_factor
    } else {
        amount
    }
}

/// Other income: flat while anyone is alive
pub fn other_income(income: &IncomeAssumptions, state: &YearState) -> f64 {
    if state.any_alive() {
        income.other_income_annual
    } else {
        0.0
    }
}

/// Level payment of one Silver/Gold source for the year.
///
/// Activation follows the owner's age (the later age for joint sources);
/// payment continues while either spouse is alive, whoever the owner is.
pub fn supplemental_income(source: &SupplementalSource, state: &YearState) -> f64 {
    if !source.is_configured() {
        return 0.0;
    }

    let active = match source.owner {
        Owner::Him => state.his_age.is_some_and(|age| age >= source.start_age),
        Owner::Her => state.her_age.is_some_and(|age| age >= source.start_age),
        Owner::Joint => state.joint_age() >= source.start_age,
    };

    if active && state.any_alive() {
        source.annual_income
    } else {
        0.0
    }
}
