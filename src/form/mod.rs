//! Form layer: raw snapshots, lenient parsing and snapshot persistence

mod parse;
mod snapshot;
pub mod store;

pub use parse::{parse_age, parse_amount, parse_percent, parse_years};
pub use snapshot::{fields, FormSnapshot};
pub use store::{SavedSnapshot, SnapshotStore, CLIENT_DATA_KEY, PLAN_INPUTS_KEY};
