//! End-to-end checks: form snapshot in, three plan schedules out

use approx::assert_relative_eq;
use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

use income_planner::form::fields;
use income_planner::household::MAX_PROJECTION_YEARS;
use income_planner::{
    project, FormSnapshot, HouseholdProfile, IncomeAssumptions, Owner, PlanInputs, PlanSummary,
    SupplementalSource,
};

fn snapshot(pairs: &[(&str, &str)]) -> FormSnapshot {
    pairs.iter().copied().collect()
}

#[test]
fn test_survivor_step_up_from_form_values() {
    let inputs = snapshot(&[
        (fields::HIS_CURRENT_AGE, "70"),
        (fields::HER_CURRENT_AGE, "68"),
        (fields::HIS_DEATH_AGE, "80"),
        (fields::HER_DEATH_AGE, "85"),
        (fields::PROJECTION_YEARS, "25"),
        (fields::HIS_SS_ANNUAL, "20,000"),
        (fields::HER_SS_ANNUAL, "15,000"),
        (fields::SS_GROWTH_PCT, "2.5"),
    ])
    .to_plan_inputs();
    let result = project(&inputs);

    let widow_years: Vec<_> = result
        .no_plan
        .rows
        .iter()
        .enumerate()
        .filter(|(_, r)| r.his_age.unwrap() > 80 && r.her_age.unwrap() <= 85)
        .collect();
    assert_eq!(widow_years.len(), 7);

    for (t, row) in widow_years {
        assert_relative_eq!(row.her_ss, 20_000.0 * 1.025f64.powi(t as i32));
        assert_eq!(row.his_ss, 0.0);
    }
}

#[test]
fn test_pension_survivor_percent_from_form_values() {
    let inputs = snapshot(&[
        (fields::HIS_CURRENT_AGE, "72"),
        (fields::HER_CURRENT_AGE, "72"),
        (fields::HIS_DEATH_AGE, "78"),
        (fields::HER_DEATH_AGE, "90"),
        (fields::PROJECTION_YEARS, "20"),
        (fields::PENSION1_ANNUAL, "10,000"),
        (fields::PENSION1_SURVIVOR_PCT, "50"),
        (fields::PENSION_GROWTH_PCT, "1"),
    ])
    .to_plan_inputs();
    let result = project(&inputs);

    for (t, row) in result.no_plan.rows.iter().enumerate() {
        let factor = 1.01f64.powi(t as i32);
        if row.his_age.unwrap() > 78 && row.her_age.unwrap() <= 90 {
            assert_relative_eq!(row.pension1, 10_000.0 * factor * 0.5);
        }
    }
}

#[test]
fn test_zero_horizon_from_blank_form() {
    let result = project(&FormSnapshot::template().to_plan_inputs());
    for schedule in result.iter() {
        assert!(schedule.rows.is_empty());
        assert_eq!(schedule.summary, PlanSummary::default());
    }
}

#[test]
fn test_huge_age_from_form_projects() {
    let inputs = snapshot(&[
        (fields::HIS_CURRENT_AGE, "5000000000"),
        (fields::HER_CURRENT_AGE, "70"),
        (fields::PROJECTION_YEARS, "3"),
        (fields::HER_SS_ANNUAL, "15,000"),
        (fields::LIVING_EXPENSES_ANNUAL, "40,000"),
    ])
    .to_plan_inputs();
    assert_eq!(inputs.profile.his_current_age, u32::MAX);

    let result = project(&inputs);
    assert_eq!(result.years(), 3);
    for row in &result.no_plan.rows {
        assert_eq!(row.his_age, Some(u32::MAX));
        assert_eq!(row.gap, row.total_income - row.expenses);
    }
}

#[test]
fn test_oversized_horizon_from_form_is_capped() {
    let inputs = snapshot(&[
        (fields::HIS_CURRENT_AGE, "65"),
        (fields::HER_CURRENT_AGE, "63"),
        (fields::PROJECTION_YEARS, "1e12"),
    ])
    .to_plan_inputs();
    assert_eq!(inputs.profile.projection_years, i32::MAX);

    let result = project(&inputs);
    assert_eq!(result.years(), MAX_PROJECTION_YEARS as usize);
}

#[test]
fn test_joint_silver_source_level_payment() {
    let inputs = snapshot(&[
        (fields::HIS_CURRENT_AGE, "66"),
        (fields::HER_CURRENT_AGE, "68"),
        (fields::HIS_DEATH_AGE, "84"),
        (fields::HER_DEATH_AGE, "82"),
        (fields::PROJECTION_YEARS, "25"),
        (fields::SS_GROWTH_PCT, "3"),
        ("silver1_owner", "joint"),
        ("silver1_annual", "5,000"),
        ("silver1_start_age", "70"),
    ])
    .to_plan_inputs();
    let result = project(&inputs);

    let paid: Vec<f64> = result.silver.rows.iter().map(|r| r.supplemental[0]).collect();
    // She reaches 70 in year index 2; he dies after 84 (index 18)
    assert_eq!(paid[1], 0.0);
    assert!(paid[2..=18].iter().all(|&v| v == 5_000.0));
    assert!(paid[19..].iter().all(|&v| v == 0.0));
}

fn inputs_from(
    his_age: u32,
    her_age: u32,
    his_extra: u32,
    her_extra: u32,
    years: i32,
    amounts: (f64, f64, f64, f64),
    silver: f64,
    gold_extra: f64,
    start_age: u32,
) -> PlanInputs {
    let (his_ss, her_ss, pension, expenses) = amounts;
    let profile = HouseholdProfile::new(
        his_age,
        her_age,
        his_age + his_extra,
        her_age + her_extra,
        years,
    );
    let income = IncomeAssumptions {
        his_ss_annual: his_ss,
        her_ss_annual: her_ss,
        ss_growth_pct: 0.02,
        pension1_annual: pension,
        pension1_survivor_pct: 0.6,
        pension_growth_pct: 0.01,
        living_expenses_annual: expenses,
        expense_inflation_pct: 0.03,
        ..Default::default()
    };

    let mut inputs = PlanInputs::new(profile, income);
    let owners = [Owner::Him, Owner::Her, Owner::Joint, Owner::Him];
    for (slot, owner) in owners.into_iter().enumerate() {
        inputs.silver[slot] = SupplementalSource::new(owner, silver, start_age);
        inputs.gold[slot] = SupplementalSource::new(owner, silver + gold_extra, start_age);
    }
    inputs
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(48))]

    #[test]
    fn prop_projection_is_idempotent(
        his_age in 0u32..90,
        her_age in 0u32..90,
        his_extra in 0u32..40,
        her_extra in 0u32..40,
        years in -5i32..60,
        his_ss in 0.0f64..60_000.0,
        her_ss in 0.0f64..60_000.0,
        pension in 0.0f64..40_000.0,
        expenses in 0.0f64..150_000.0,
        silver in 0.0f64..20_000.0,
        gold_extra in 0.0f64..20_000.0,
        start_age in 0u32..90,
    ) {
        let inputs = inputs_from(
            his_age, her_age, his_extra, her_extra, years,
            (his_ss, her_ss, pension, expenses), silver, gold_extra, start_age,
        );
        let first = project(&inputs);
        let second = project(&inputs);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.years(), years.max(0) as usize);
    }

    #[test]
    fn prop_gap_and_plan_ordering(
        his_age in 1u32..90,
        her_age in 1u32..90,
        his_extra in 0u32..40,
        her_extra in 0u32..40,
        years in 1i32..60,
        his_ss in 0.0f64..60_000.0,
        her_ss in 0.0f64..60_000.0,
        pension in 0.0f64..40_000.0,
        expenses in 0.0f64..150_000.0,
        silver in 0.0f64..20_000.0,
        gold_extra in 0.0f64..20_000.0,
        start_age in 0u32..90,
    ) {
        let inputs = inputs_from(
            his_age, her_age, his_extra, her_extra, years,
            (his_ss, her_ss, pension, expenses), silver, gold_extra, start_age,
        );
        let result = project(&inputs);

        for schedule in result.iter() {
            for row in &schedule.rows {
                prop_assert_eq!(row.gap, row.total_income - row.expenses);
            }
            let first = &schedule.rows[0];
            prop_assert_eq!(schedule.summary.income, first.total_income);
            prop_assert_eq!(schedule.summary.expenses, first.expenses);
            prop_assert_eq!(schedule.summary.gap, first.gap);
        }

        for ((np, s), g) in result.no_plan.rows.iter().zip(&result.silver.rows).zip(&result.gold.rows) {
            prop_assert!(s.total_income >= np.total_income);
            prop_assert!(g.total_income >= s.total_income);
        }
    }
}
