use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const MAX_HISTORY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    pub command: String,
}

impl HistoryEntry {
    pub fn new(query: impl Into<String>, command: impl Into<String>) -> Self {
        HistoryEntry {
            query: query.into(),
            command: command.into(),
        }
    }
}

pub struct HistoryStore {
    history_file: PathBuf,
    max_history_size: usize,
}

impl HistoryStore {
    pub fn new(history_file: impl Into<PathBuf>) -> Self {
        HistoryStore {
            history_file: history_file.into(),
            max_history_size: MAX_HISTORY,
        }
    }

    pub fn load(&self) -> Result<Vec<HistoryEntry>> {
        if !self.history_file.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.history_file).with_context(|| {
            format!("Failed to read history file {}", self.history_file.display())
        })?;
        let entries: Vec<HistoryEntry> = serde_json::from_str(&content).with_context(|| {
            format!("Failed to parse history file {}", self.history_file.display())
        })?;
        debug!("Loaded {} history entries", entries.len());
        Ok(entries)
    }

    /// Persists only the most recent `MAX_HISTORY` entries, oldest first.
    pub fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        if let Some(parent) = self.history_file.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let start = entries.len().saturating_sub(self.max_history_size);
        let json = serde_json::to_string_pretty(&entries[start..])?;
        fs::write(&self.history_file, json).with_context(|| {
            format!("Failed to write history file {}", self.history_file.display())
        })?;
        Ok(())
    }

    pub fn append(&self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.load()?;
        entries.push(entry);
        self.save(&entries)
    }
}
