//! Stress run settings

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Slots per worker queue. Fixed at compile time by the queue type.
pub const QUEUE_CAPACITY: usize = 1024;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse stress settings")]
    Parse(#[from] serde_json::Error),

    #[error("`{field}` must be at least 1")]
    Zero { field: &'static str },
}

/// Shape of a stress run: one owner thread, `stealers` thief threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StressSettings {
    pub stealers: usize,
    pub items_per_round: u64,
    pub rounds: usize,
    /// The owner pops once after every `pop_every` pushes.
    pub pop_every: u64,
}

impl Default for StressSettings {
    fn default() -> Self {
        Self {
            stealers: 3,
            items_per_round: 10_000,
            rounds: 8,
            pop_every: 4,
        }
    }
}

impl StressSettings {
    /// Load settings from a JSON file, falling back to defaults if it is missing.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::info!("Settings file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let fields = [
            ("stealers", self.stealers as u64),
            ("items_per_round", self.items_per_round),
            ("rounds", self.rounds as u64),
            ("pop_every", self.pop_every),
        ];
        match fields.iter().find(|(_, value)| *value == 0) {
            Some(&(field, _)) => Err(SettingsError::Zero { field }),
            None => Ok(()),
        }
    }
}
