//! Named snapshot persistence, one JSON file per key

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::FormSnapshot;
use crate::error::{PlannerError, Result};

/// Key of the client data (household and assets) snapshot
pub const CLIENT_DATA_KEY: &str = "client_data";

/// Key of the plan inputs (income, expenses, Silver/Gold sources) snapshot
pub const PLAN_INPUTS_KEY: &str = "plan_inputs";

/// Default store location, relative to the working directory
pub const DEFAULT_STORE_DIR: &str = "data/snapshots";

/// A snapshot as written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSnapshot {
    pub saved_at: DateTime<Utc>,
    pub fields: FormSnapshot,
}

/// Directory of saved form snapshots
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PlannerError::InvalidRecord {
                row: 0,
                reason: format!("snapshot key {key:?} must be alphanumeric, '_' or '-'"),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    /// Write a snapshot under `key`, replacing any previous one
    pub fn save(&self, key: &str, snapshot: &FormSnapshot) -> Result<SavedSnapshot> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let saved = SavedSnapshot {
            saved_at: Utc::now(),
            fields: snapshot.clone(),
        };
        let writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(writer, &saved)?;

        info!(
            "Saved {} fields to {} ({})",
            snapshot.len(),
            path.display(),
            saved.saved_at.format("%H:%M")
        );
        Ok(saved)
    }

    /// Read the snapshot under `key`; `None` if it was never saved
    pub fn load(&self, key: &str) -> Result<Option<SavedSnapshot>> {
        let path = self.path_for(key)?;
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No snapshot at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let saved: SavedSnapshot = serde_json::from_reader(BufReader::new(file))?;
        debug!("Loaded {} fields from {}", saved.fields.len(), path.display());
        Ok(Some(saved))
    }

    /// Keys of all saved snapshots, sorted
    pub fn keys(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_DIR)
    }
}
