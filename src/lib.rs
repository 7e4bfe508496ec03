//! Income Planner - retirement income projections for two-person households
//!
//! This library provides:
//! - Year-by-year income vs. expense projections under No Plan, Silver and Gold
//! - Social Security survivor step-up and pension survivor percentages
//! - Level supplemental (annuity) income sources with joint-life continuation
//! - Form snapshot normalization and JSON snapshot persistence
//! - Asset summaries and per-plan asset allocation
//! - CSV reporting and parallel batch projections

pub mod error;
pub mod household;
pub mod form;
pub mod projection;
pub mod assets;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::PlannerError;
pub use household::{HouseholdProfile, IncomeAssumptions, Owner, PlanInputs, SupplementalSource};
pub use form::{FormSnapshot, SnapshotStore};
pub use projection::{project, Plan, PlanSchedule, PlanSummary, ProjectionEngine, ProjectionResult, ScheduleRow};
pub use assets::{AssetInputs, AssetSummary, PlanAssets};
pub use scenario::ScenarioRunner;
