//! Load households for batch projection from CSV
//!
//! Column headers are form field ids (see [`crate::form::fields`]) plus a
//! `household_id` column. Every record is normalized exactly like a form
//! snapshot, so blank or malformed cells become zero.

use std::path::Path;

use csv::Reader;
use log::info;
use serde::{Deserialize, Serialize};

use super::PlanInputs;
use crate::error::{PlannerError, Result};
use crate::form::FormSnapshot;

/// Name of the identifying column
pub const HOUSEHOLD_ID_COLUMN: &str = "household_id";

/// One household of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdRecord {
    pub household_id: u32,
    pub inputs: PlanInputs,
}

/// Load all households from a CSV file
pub fn load_households<P: AsRef<Path>>(path: P) -> Result<Vec<HouseholdRecord>> {
    let reader = Reader::from_path(path.as_ref())?;
    let households = read_households(reader)?;
    info!(
        "Loaded {} households from {}",
        households.len(),
        path.as_ref().display()
    );
    Ok(households)
}

/// Load households from any reader (e.g., string buffer, request body)
pub fn load_households_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<HouseholdRecord>> {
    read_households(Reader::from_reader(reader))
}

fn read_households<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<HouseholdRecord>> {
    let headers = reader.headers()?.clone();
    let id_index = headers
        .iter()
        .position(|h| h.trim() == HOUSEHOLD_ID_COLUMN)
        .ok_or_else(|| PlannerError::MissingColumn(HOUSEHOLD_ID_COLUMN.to_string()))?;

    let mut households = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        // Header is line 1
        let row = i + 2;

        let raw_id = record.get(id_index).unwrap_or("").trim();
        let household_id = raw_id.parse::<u32>().map_err(|_| PlannerError::InvalidRecord {
            row,
            reason: format!("household_id {raw_id:?} is not a whole number"),
        })?;

        let snapshot: FormSnapshot = headers
            .iter()
            .zip(record.iter())
            .filter(|(header, _)| header.trim() != HOUSEHOLD_ID_COLUMN)
            .map(|(header, value)| (header.trim(), value))
            .collect();

        households.push(HouseholdRecord {
            household_id,
            inputs: snapshot.to_plan_inputs(),
        });
    }

    Ok(households)
}
