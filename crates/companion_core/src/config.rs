use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::StoreError;
use crate::state::{StateDefaults, DEFAULT_MAXIMUM_HEALTH, DEFAULT_SPELL_SLOTS};
use crate::storage::FileStore;

pub const DEFAULT_STORE_PATH: &str = "companion.json";

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct CompanionConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}

impl CompanionConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&data).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml(data: &str) -> Result<Self> {
        let cfg: CompanionConfig = toml::from_str(data)?;
        Ok(cfg)
    }

    pub fn state_defaults(&self) -> StateDefaults {
        StateDefaults {
            maximum_health: self.defaults.maximum_health(),
            spell_slots: self.defaults.spell_slots(),
        }
    }

    /// Opens the configured store. An unreadable file starts empty so the
    /// character falls back to the defaults.
    pub fn open_store(&self) -> Result<FileStore, StoreError> {
        FileStore::open_or_empty(self.storage.path())
    }

    pub fn telemetry(&self) -> TelemetryConfig {
        self.telemetry.clone().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub maximum_health: Option<i32>,
    #[serde(default)]
    pub spell_slots: Option<Vec<i32>>,
}

impl DefaultsConfig {
    pub fn maximum_health(&self) -> i32 {
        self.maximum_health.unwrap_or(DEFAULT_MAXIMUM_HEALTH)
    }
    pub fn spell_slots(&self) -> Vec<i32> {
        self.spell_slots
            .clone()
            .unwrap_or_else(|| DEFAULT_SPELL_SLOTS.to_vec())
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH))
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub enable_trace: Option<bool>,
    #[serde(default)]
    pub trace_filter: Option<String>,
}
