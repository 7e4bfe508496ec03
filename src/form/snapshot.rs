//! Form snapshots: raw field values keyed by field id
//!
//! A snapshot is what the user typed, exactly. Normalization into typed
//! inputs happens in [`FormSnapshot::to_plan_inputs`] and
//! [`FormSnapshot::to_asset_inputs`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::parse::{parse_age, parse_amount, parse_percent, parse_years};
use crate::assets::{AssetInputs, RealEstate, ACCOUNTS_PER_GROUP};
use crate::household::{
    HouseholdProfile, IncomeAssumptions, Owner, PlanInputs, SupplementalSource, SOURCES_PER_PLAN,
};
use crate::projection::Plan;

/// Field ids understood by the normalizers
pub mod fields {
    pub const HIS_CURRENT_AGE: &str = "his_current_age";
    pub const HER_CURRENT_AGE: &str = "her_current_age";
    pub const HIS_DEATH_AGE: &str = "his_death_age";
    pub const HER_DEATH_AGE: &str = "her_death_age";
    pub const PROJECTION_YEARS: &str = "projection_years";

    pub const SS_GROWTH_PCT: &str = "ss_growth_pct";
    pub const PENSION_GROWTH_PCT: &str = "pension_growth_pct";
    pub const EXPENSE_INFLATION_PCT: &str = "expense_inflation_pct";

    pub const HIS_SS_ANNUAL: &str = "his_ss_annual";
    pub const HER_SS_ANNUAL: &str = "her_ss_annual";
    pub const HIS_SS_START_AGE: &str = "his_ss_start_age";
    pub const HER_SS_START_AGE: &str = "her_ss_start_age";

    pub const PENSION1_ANNUAL: &str = "pension1_annual";
    pub const PENSION1_START_AGE: &str = "pension1_start_age";
    pub const PENSION1_SURVIVOR_PCT: &str = "pension1_survivor_pct";
    pub const PENSION2_ANNUAL: &str = "pension2_annual";
    pub const PENSION2_START_AGE: &str = "pension2_start_age";
    pub const PENSION2_SURVIVOR_PCT: &str = "pension2_survivor_pct";

    pub const OTHER_INCOME_ANNUAL: &str = "other_income_annual";
    pub const LIVING_EXPENSES_ANNUAL: &str = "living_expenses_annual";

    pub const PRIMARY_VALUE: &str = "primary_value";
    pub const PRIMARY_MORTGAGE: &str = "primary_mortgage";
    pub const SECONDARY_VALUE: &str = "secondary_value";
    pub const SECONDARY_MORTGAGE: &str = "secondary_mortgage";

    /// Attributes of each Silver/Gold slot
    pub const SOURCE_ATTRIBUTES: [&str; 5] = ["owner", "annual", "start_age", "rollover", "desc"];

    /// Prefixes of the three account groups
    pub const ACCOUNT_GROUPS: [&str; 3] = ["inv", "sav", "ann"];

    pub const SCALARS: [&str; 24] = [
        HIS_CURRENT_AGE,
        HER_CURRENT_AGE,
        HIS_DEATH_AGE,
        HER_DEATH_AGE,
        PROJECTION_YEARS,
        SS_GROWTH_PCT,
        PENSION_GROWTH_PCT,
        EXPENSE_INFLATION_PCT,
        HIS_SS_ANNUAL,
        HER_SS_ANNUAL,
        HIS_SS_START_AGE,
        HER_SS_START_AGE,
        PENSION1_ANNUAL,
        PENSION1_START_AGE,
        PENSION1_SURVIVOR_PCT,
        PENSION2_ANNUAL,
        PENSION2_START_AGE,
        PENSION2_SURVIVOR_PCT,
        OTHER_INCOME_ANNUAL,
        LIVING_EXPENSES_ANNUAL,
        PRIMARY_VALUE,
        PRIMARY_MORTGAGE,
        SECONDARY_VALUE,
        SECONDARY_MORTGAGE,
    ];

    /// Field id of one attribute of a Silver/Gold slot, e.g. `silver2_start_age`
    pub fn source(plan_key: &str, slot: usize, attribute: &str) -> String {
        format!("{plan_key}{slot}_{attribute}")
    }

    /// Field id of one account balance, e.g. `inv3_balance`
    pub fn balance(group: &str, slot: usize) -> String {
        format!("{group}{slot}_balance")
    }
}

/// Raw form values keyed by field id, serialized as a flat JSON object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSnapshot {
    fields: BTreeMap<String, String>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every known field id with an empty value
    pub fn template() -> Self {
        let mut snapshot = Self::new();
        for id in fields::SCALARS {
            snapshot.set(id, "");
        }
        for plan in [Plan::Silver, Plan::Gold] {
            for slot in 1..=SOURCES_PER_PLAN {
                for attribute in fields::SOURCE_ATTRIBUTES {
                    snapshot.set(fields::source(plan.key(), slot, attribute), "");
                }
            }
        }
        for group in fields::ACCOUNT_GROUPS {
            for slot in 1..=ACCOUNTS_PER_GROUP {
                snapshot.set(fields::balance(group, slot), "");
            }
        }
        snapshot
    }

    /// Build from any JSON object; non-string values keep their JSON text
    pub fn from_json_value(value: &serde_json::Value) -> Self {
        let mut snapshot = Self::new();
        if let Some(object) = value.as_object() {
            for (id, raw) in object {
                let text = match raw {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Null => String::new(),
                    other => other.to_string(),
                };
                snapshot.set(id.clone(), text);
            }
        }
        snapshot
    }

    pub fn set(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(id.into(), value.into());
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.fields.get(id).map(String::as_str)
    }

    /// Raw text of a field, empty when absent
    pub fn text(&self, id: &str) -> &str {
        self.get(id).unwrap_or("")
    }

    pub fn amount(&self, id: &str) -> f64 {
        parse_amount(self.text(id))
    }

    pub fn percent(&self, id: &str) -> f64 {
        parse_percent(self.text(id))
    }

    pub fn age(&self, id: &str) -> u32 {
        parse_age(self.text(id))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Combine two snapshots; values in `other` win
    pub fn merged(&self, other: &FormSnapshot) -> FormSnapshot {
        let mut fields = self.fields.clone();
        fields.extend(other.fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        FormSnapshot { fields }
    }

    /// Normalize into the projection engine's input bundle
    pub fn to_plan_inputs(&self) -> PlanInputs {
        use fields::*;

        let profile = HouseholdProfile::new(
            self.age(HIS_CURRENT_AGE),
            self.age(HER_CURRENT_AGE),
            self.age(HIS_DEATH_AGE),
            self.age(HER_DEATH_AGE),
            parse_years(self.text(PROJECTION_YEARS)),
        );

        let income = IncomeAssumptions {
            his_ss_annual: self.amount(HIS_SS_ANNUAL),
            her_ss_annual: self.amount(HER_SS_ANNUAL),
            his_ss_start_age: self.age(HIS_SS_START_AGE),
            her_ss_start_age: self.age(HER_SS_START_AGE),
            ss_growth_pct: self.percent(SS_GROWTH_PCT),
            pension1_annual: self.amount(PENSION1_ANNUAL),
            pension1_start_age: self.age(PENSION1_START_AGE),
            pension1_survivor_pct: self.percent(PENSION1_SURVIVOR_PCT),
            pension2_annual: self.amount(PENSION2_ANNUAL),
            pension2_start_age: self.age(PENSION2_START_AGE),
            pension2_survivor_pct: self.percent(PENSION2_SURVIVOR_PCT),
            pension_growth_pct: self.percent(PENSION_GROWTH_PCT),
            other_income_annual: self.amount(OTHER_INCOME_ANNUAL),
            living_expenses_annual: self.amount(LIVING_EXPENSES_ANNUAL),
            expense_inflation_pct: self.percent(EXPENSE_INFLATION_PCT),
        };

        PlanInputs {
            profile,
            income,
            silver: self.sources(Plan::Silver),
            gold: self.sources(Plan::Gold),
        }
    }

    fn sources(&self, plan: Plan) -> [SupplementalSource; SOURCES_PER_PLAN] {
        std::array::from_fn(|i| {
            let slot = i + 1;
            let field = |attribute: &str| fields::source(plan.key(), slot, attribute);

            let description = self.text(&field("desc")).trim();
            let description = if description.is_empty() {
                format!("{} {} Income", plan.label(), slot)
            } else {
                description.to_string()
            };

            SupplementalSource {
                owner: Owner::from_label(self.text(&field("owner"))),
                annual_income: self.amount(&field("annual")),
                start_age: self.age(&field("start_age")),
                rollover_amount: self.amount(&field("rollover")),
                description,
            }
        })
    }

    /// Normalize the client asset fields
    pub fn to_asset_inputs(&self) -> AssetInputs {
        use fields::*;

        let balances = |group: &str| -> [f64; ACCOUNTS_PER_GROUP] {
            std::array::from_fn(|i| self.amount(&balance(group, i + 1)))
        };

        AssetInputs {
            primary: RealEstate {
                value: self.amount(PRIMARY_VALUE),
                mortgage: self.amount(PRIMARY_MORTGAGE),
            },
            secondary: RealEstate {
                value: self.amount(SECONDARY_VALUE),
                mortgage: self.amount(SECONDARY_MORTGAGE),
            },
            investments: balances("inv"),
            savings: balances("sav"),
            annuities: balances("ann"),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (k, v) in iter {
            snapshot.set(k, v);
        }
        snapshot
    }
}
