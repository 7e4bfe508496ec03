//! Error type for the I/O edges of the planner (snapshot store, CSV loading and export)
//!
//! The projection engine itself never fails.

use thiserror::Error;

/// Errors raised while reading or writing planner data
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("invalid record {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, PlannerError>;
