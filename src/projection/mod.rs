//! Projection engine producing yearly income vs. expense schedules

mod state;
mod engine;
mod income;
mod schedule;

pub use state::YearState;
pub use engine::{project, ProjectionEngine};
pub use income::{
    other_income, pension_payment, social_security, supplemental_income, PensionTerms,
    SocialSecurity,
};
pub use schedule::{Plan, PlanOverview, PlanSchedule, PlanSummary, ProjectionResult, ScheduleRow};
