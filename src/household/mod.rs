//! Household data structures and batch loading

mod data;
pub mod loader;

pub use data::{
    start_age_or_current, HouseholdProfile, IncomeAssumptions, Owner, PlanInputs,
    SupplementalSource, DEFAULT_LIFESPAN_YEARS, MAX_PROJECTION_YEARS, SOURCES_PER_PLAN,
};
pub use loader::{load_households, load_households_from_reader, HouseholdRecord};
