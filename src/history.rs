use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::catalog::ability::AbilitySlot;
use crate::error::AppError;

/// Self-reported recall quality for one ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Nailed,
    Partial,
    NoIdea,
}

impl Rating {
    pub const MAX_POINTS: u32 = 2;

    pub fn points(self) -> u32 {
        match self {
            Rating::Nailed => 2,
            Rating::Partial => 1,
            Rating::NoIdea => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::Nailed => "Nailed it",
            Rating::Partial => "Partially",
            Rating::NoIdea => "No idea",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillReviewRecord {
    pub champion_id: String,
    pub champion_name: String,
    pub ability_key: AbilitySlot,
    pub ability_name: String,
    pub rating: Rating,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Append-only log of skill reviews kept in a single JSON file.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HistoryStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored record in append order. A missing or unreadable file
    /// reads as an empty history.
    pub fn load(&self) -> Vec<SkillReviewRecord> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read history {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Ignoring corrupted history {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Appends a batch after whatever is already stored.
    pub fn append(&self, records: &[SkillReviewRecord]) -> Result<(), AppError> {
        if records.is_empty() {
            return Ok(());
        }
        let mut merged = self.load();
        merged.extend_from_slice(records);
        self.save(&merged)
    }

    /// Removes every record. Callers confirm with the user first.
    pub fn clear(&self) -> Result<(), AppError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::StorageError(format!(
                "Failed to clear history {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn save(&self, records: &[SkillReviewRecord]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::StorageError(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string(records).map_err(|e| {
            AppError::JsonError(format!("Failed to serialize history: {}", e))
        })?;

        fs::write(&self.path, json).map_err(|e| {
            AppError::StorageError(format!("Failed to write history: {}", e))
        })?;

        Ok(())
    }
}
