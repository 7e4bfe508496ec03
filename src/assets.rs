//! Asset summary and per-plan asset allocation
//!
//! Real-estate equity, account group totals and the allocation of financial
//! assets between savings, annuities and investments for each plan.

use serde::{Deserialize, Serialize};

use crate::household::PlanInputs;
use crate::projection::Plan;

/// Number of accounts captured per group (investments, savings, annuities)
pub const ACCOUNTS_PER_GROUP: usize = 5;

/// A property and the mortgage against it
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RealEstate {
    pub value: f64,
    pub mortgage: f64,
}

impl RealEstate {
    /// Equity, never negative
    pub fn equity(&self) -> f64 {
        (self.value - self.mortgage).max(0.0)
    }
}

/// Client asset inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetInputs {
    pub primary: RealEstate,
    pub secondary: RealEstate,
    pub investments: [f64; ACCOUNTS_PER_GROUP],
    pub savings: [f64; ACCOUNTS_PER_GROUP],
    pub annuities: [f64; ACCOUNTS_PER_GROUP],
}

/// Count of funded accounts and their total balance
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountGroup {
    pub count: usize,
    pub total: f64,
}

impl AccountGroup {
    fn from_balances(balances: &[f64]) -> Self {
        Self {
            count: balances.iter().filter(|&&b| b > 0.0).count(),
            total: balances.iter().sum(),
        }
    }
}

/// Totals shown on the asset summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetSummary {
    pub primary_equity: f64,
    pub secondary_equity: f64,
    pub real_estate_equity: f64,

    pub investments: AccountGroup,
    pub savings: AccountGroup,
    pub annuities: AccountGroup,

    pub financial_assets: f64,
    pub total_assets: f64,

    /// Shares of financial assets in percent (0 when there are none)
    pub investments_pct: f64,
    pub savings_pct: f64,
    pub annuities_pct: f64,
}

impl AssetSummary {
    pub fn from_inputs(inputs: &AssetInputs) -> Self {
        let primary_equity = inputs.primary.equity();
        let secondary_equity = inputs.secondary.equity();
        let real_estate_equity = primary_equity + secondary_equity;

        let investments = AccountGroup::from_balances(&inputs.investments);
        let savings = AccountGroup::from_balances(&inputs.savings);
        let annuities = AccountGroup::from_balances(&inputs.annuities);
        let financial_assets = investments.total + savings.total + annuities.total;

        let share = |part: f64| {
            if financial_assets > 0.0 {
                part / financial_assets * 100.0
            } else {
                0.0
            }
        };

        Self {
            primary_equity,
            secondary_equity,
            real_estate_equity,
            investments,
            savings,
            annuities,
            financial_assets,
            total_assets: real_estate_equity + financial_assets,
            investments_pct: share(investments.total),
            savings_pct: share(savings.total),
            annuities_pct: share(annuities.total),
        }
    }

    /// Financial assets before any plan is applied
    pub fn base_allocation(&self) -> PlanAssets {
        PlanAssets {
            savings: self.savings.total,
            annuities: self.annuities.total,
            investments: self.investments.total,
        }
    }
}

/// Financial assets by category under one plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanAssets {
    pub savings: f64,
    pub annuities: f64,
    pub investments: f64,
}

impl PlanAssets {
    pub fn total(&self) -> f64 {
        self.savings + self.annuities + self.investments
    }

    /// Move `amount` into annuities, drawing on investments first, then savings.
    ///
    /// Only what is actually available moves; neither source goes negative.
    pub fn with_rollover(&self, amount: f64) -> PlanAssets {
        let mut remaining = amount.max(0.0);

        let from_investments = remaining.min(self.investments.max(0.0));
        remaining -= from_investments;
        let from_savings = remaining.min(self.savings.max(0.0));

        PlanAssets {
            savings: self.savings - from_savings,
            annuities: self.annuities + from_investments + from_savings,
            investments: self.investments - from_investments,
        }
    }

    /// Allocation for `plan`, moving that plan's rollovers into annuities
    pub fn for_plan(base: &PlanAssets, plan: Plan, inputs: &PlanInputs) -> PlanAssets {
        let sources = match plan {
            Plan::NoPlan => return *base,
            Plan::Silver => &inputs.silver,
            Plan::Gold => &inputs.gold,
        };
        let rollover: f64 = sources.iter().map(|s| s.rollover_amount).sum();
        base.with_rollover(rollover)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::{Owner, SupplementalSource};
    use approx::assert_relative_eq;

    fn inputs() -> AssetInputs {
        AssetInputs {
            primary: RealEstate {
                value: 500_000.0,
                mortgage: 150_000.0,
            },
            secondary: RealEstate {
                value: 100_000.0,
                mortgage: 140_000.0,
            },
            investments: [300_000.0, 100_000.0, 0.0, 0.0, 0.0],
            savings: [50_000.0, 0.0, 0.0, 0.0, 0.0],
            annuities: [50_000.0, 0.0, 0.0, 0.0, 0.0],
        }
    }

    #[test]
    fn test_equity_is_floored() {
        let summary = AssetSummary::from_inputs(&inputs());
        assert_relative_eq!(summary.primary_equity, 350_000.0);
        assert_eq!(summary.secondary_equity, 0.0);
        assert_relative_eq!(summary.real_estate_equity, 350_000.0);
    }

    #[test]
    fn test_group_counts_and_totals() {
        let summary = AssetSummary::from_inputs(&inputs());
        assert_eq!(summary.investments.count, 2);
        assert_relative_eq!(summary.investments.total, 400_000.0);
        assert_eq!(summary.savings.count, 1);
        assert_relative_eq!(summary.financial_assets, 500_000.0);
        assert_relative_eq!(summary.total_assets, 850_000.0);
    }

    #[test]
    fn test_allocation_percentages() {
        let summary = AssetSummary::from_inputs(&inputs());
        assert_relative_eq!(summary.investments_pct, 80.0);
        assert_relative_eq!(summary.savings_pct, 10.0);
        assert_relative_eq!(summary.annuities_pct, 10.0);

        let empty = AssetSummary::from_inputs(&AssetInputs::default());
        assert_eq!(empty.investments_pct, 0.0);
        assert_eq!(empty.savings_pct, 0.0);
    }

    #[test]
    fn test_rollover_draws_investments_then_savings() {
        let base = PlanAssets {
            savings: 50_000.0,
            annuities: 10_000.0,
            investments: 100_000.0,
        };

        let moved = base.with_rollover(120_000.0);
        assert_relative_eq!(moved.investments, 0.0);
        assert_relative_eq!(moved.savings, 30_000.0);
        assert_relative_eq!(moved.annuities, 130_000.0);
        assert_relative_eq!(moved.total(), base.total());

        let capped = base.with_rollover(1_000_000.0);
        assert_eq!(capped.investments, 0.0);
        assert_eq!(capped.savings, 0.0);
        assert_relative_eq!(capped.annuities, 160_000.0);
    }

    #[test]
    fn test_for_plan_uses_plan_rollovers() {
        let base = AssetSummary::from_inputs(&inputs()).base_allocation();
        let mut plan_inputs = PlanInputs::default();
        plan_inputs.silver[0] = SupplementalSource {
            rollover_amount: 100_000.0,
            ..SupplementalSource::new(Owner::Him, 6_000.0, 70)
        };
        plan_inputs.gold[0].rollover_amount = 150_000.0;
        plan_inputs.gold[2].rollover_amount = 50_000.0;

        assert_eq!(PlanAssets::for_plan(&base, Plan::NoPlan, &plan_inputs), base);

        let silver = PlanAssets::for_plan(&base, Plan::Silver, &plan_inputs);
        assert_relative_eq!(silver.investments, 300_000.0);
        assert_relative_eq!(silver.annuities, 150_000.0);

        let gold = PlanAssets::for_plan(&base, Plan::Gold, &plan_inputs);
        assert_relative_eq!(gold.investments, 200_000.0);
        assert_relative_eq!(gold.annuities, 250_000.0);
    }
}
