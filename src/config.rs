//! Configuration management
//!
//! Manages trainer configuration: storage location and merge behavior.
//! Release thresholds are deliberately not configurable — they are part
//! of the readiness contract, not preferences.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Corpus storage settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Merge behavior settings
    #[serde(default)]
    pub merge: MergeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File name of the persisted corpus under the data directory
    #[serde(default = "default_corpus_file")]
    pub corpus_file: String,
}

fn default_corpus_file() -> String {
    "corpus.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            corpus_file: default_corpus_file(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Compare merge keys after trim + casefold instead of exact equality
    #[serde(default)]
    pub normalize_keys: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            merge: MergeConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            let config: Config = toml::from_str(&contents)
                .context("Failed to parse config file")?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = config_path()?;
        let parent = config_path.parent()
            .context("Config path has no parent")?;

        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Full path of the persisted corpus document
    pub fn corpus_path(&self) -> Result<PathBuf> {
        Ok(data_dir()?.join(&self.storage.corpus_file))
    }
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "bot-trainer", "bot-trainer")
        .context("Failed to get project directories")?;
    Ok(base.config_dir().join("config.toml"))
}

/// Get the data directory path
pub fn data_dir() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "bot-trainer", "bot-trainer")
        .context("Failed to get project directories")?;
    Ok(base.data_dir().to_path_buf())
}
