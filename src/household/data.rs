//! Household, income and supplemental source data structures

use serde::{Deserialize, Serialize};

/// Years of life assumed past the current age when no death age is given
pub const DEFAULT_LIFESPAN_YEARS: u32 = 30;

/// Longest horizon the engine will project; larger requests are clamped
pub const MAX_PROJECTION_YEARS: u32 = 150;

/// Number of supplemental income slots in each of the Silver and Gold plans
pub const SOURCES_PER_PLAN: usize = 4;

/// Whose age activates a supplemental source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Him,
    Her,
    /// Activates on the later of the two ages
    #[default]
    Joint,
}

impl Owner {
    /// Normalize a free-text owner label.
    ///
    /// Matching is case-insensitive on the leading characters: "her", "s" (spouse)
    /// and "w" (wife) map to `Her`, any other "h" label to `Him`, and everything
    /// else (blank, "joint", "both") to `Joint`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        if label.starts_with("her") || label.starts_with('s') || label.starts_with('w') {
            Owner::Her
        } else if label.starts_with('h') {
            Owner::Him
        } else {
            Owner::Joint
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Owner::Him => "his",
            Owner::Her => "her",
            Owner::Joint => "joint",
        }
    }
}

/// Ages, death ages and horizon for one projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdProfile {
    /// His age today (0 = his track is not modeled)
    pub his_current_age: u32,

    /// Her age today (0 = her track is not modeled)
    pub her_current_age: u32,

    /// Last age at which he is alive
    pub his_death_age: u32,

    /// Last age at which she is alive
    pub her_death_age: u32,

    /// Years to project; non-positive yields an empty projection
    pub projection_years: i32,
}

impl HouseholdProfile {
    /// Build a profile, defaulting unset (zero) death ages to current age + 30
    pub fn new(
        his_current_age: u32,
        her_current_age: u32,
        his_death_age: u32,
        her_death_age: u32,
        projection_years: i32,
    ) -> Self {
        let default_death = |current: u32, given: u32| {
            if given == 0 {
                current.saturating_add(DEFAULT_LIFESPAN_YEARS)
            } else {
                given
            }
        };

        Self {
            his_current_age,
            her_current_age,
            his_death_age: default_death(his_current_age, his_death_age),
            her_death_age: default_death(her_current_age, her_death_age),
            projection_years,
        }
    }

    pub fn models_him(&self) -> bool {
        self.his_current_age > 0
    }

    pub fn models_her(&self) -> bool {
        self.her_current_age > 0
    }

    /// His age in the given projection year, if his track is modeled
    pub fn his_age(&self, year_index: u32) -> Option<u32> {
        self.models_him().then(|| self.his_current_age.saturating_add(year_index))
    }

    /// Her age in the given projection year, if her track is modeled
    pub fn her_age(&self, year_index: u32) -> Option<u32> {
        self.models_her().then(|| self.her_current_age.saturating_add(year_index))
    }

    /// Age at the first death, gating the pension survivor percentage
    pub fn first_death_age(&self) -> u32 {
        self.his_death_age.min(self.her_death_age)
    }

    /// Number of rows the engine will produce, capped at `MAX_PROJECTION_YEARS`
    pub fn horizon(&self) -> u32 {
        (self.projection_years.max(0) as u32).min(MAX_PROJECTION_YEARS)
    }

    /// Whether the requested horizon exceeds `MAX_PROJECTION_YEARS`
    pub fn horizon_clamped(&self) -> bool {
        self.projection_years > MAX_PROJECTION_YEARS as i32
    }
}

impl Default for HouseholdProfile {
    fn default() -> Self {
        Self::new(0, 0, 0, 0, 0)
    }
}

/// Base income, expense and growth assumptions (rates are fractions)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeAssumptions {
    pub his_ss_annual: f64,
    pub her_ss_annual: f64,

    /// 0 = his current age
    pub his_ss_start_age: u32,
    /// 0 = her current age
    pub her_ss_start_age: u32,

    pub ss_growth_pct: f64,

    /// Pension keyed to his age track
    pub pension1_annual: f64,
    pub pension1_start_age: u32,
    /// Fraction continuing after the first death (0 = 100%)
    pub pension1_survivor_pct: f64,

    /// Pension keyed to her age track
    pub pension2_annual: f64,
    pub pension2_start_age: u32,
    pub pension2_survivor_pct: f64,

    pub pension_growth_pct: f64,

    pub other_income_annual: f64,

    pub living_expenses_annual: f64,
    pub expense_inflation_pct: f64,
}

impl IncomeAssumptions {
    pub fn pension1_survivor_factor(&self) -> f64 {
        survivor_factor(self.pension1_survivor_pct)
    }

    pub fn pension2_survivor_factor(&self) -> f64 {
        survivor_factor(self.pension2_survivor_pct)
    }

    /// Whether his base SS benefit is the larger one (ties go to him)
    pub fn ss_high_is_his(&self) -> bool {
        self.his_ss_annual >= self.her_ss_annual
    }
}

fn survivor_factor(pct: f64) -> f64 {
    if pct == 0.0 {
        1.0
    } else {
        pct
    }
}

/// Resolve a start age, falling back to the owner's current age when unset
pub fn start_age_or_current(start_age: u32, current_age: u32) -> u32 {
    if start_age == 0 {
        current_age
    } else {
        start_age
    }
}

/// One Silver or Gold supplemental income slot (a level annuity payment)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplementalSource {
    pub owner: Owner,

    /// Level annual payment once active
    pub annual_income: f64,

    /// Age at which the payment starts
    pub start_age: u32,

    /// Balance annuitized to fund the payment (asset allocation only)
    pub rollover_amount: f64,

    /// Insurer or contract label used as a column heading
    #[serde(default)]
    pub description: String,
}

impl SupplementalSource {
    pub fn new(owner: Owner, annual_income: f64, start_age: u32) -> Self {
        Self {
            owner,
            annual_income,
            start_age,
            ..Default::default()
        }
    }

    /// A slot with no amount or no start age never pays
    pub fn is_configured(&self) -> bool {
        self.annual_income != 0.0 && self.start_age != 0
    }
}

/// Everything the projection engine needs for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanInputs {
    pub profile: HouseholdProfile,
    pub income: IncomeAssumptions,
    pub silver: [SupplementalSource; SOURCES_PER_PLAN],
    pub gold: [SupplementalSource; SOURCES_PER_PLAN],
}

impl PlanInputs {
    pub fn new(profile: HouseholdProfile, income: IncomeAssumptions) -> Self {
        Self {
            profile,
            income,
            ..Default::default()
        }
    }
}
