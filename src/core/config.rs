//! Organizer configuration
//!
//! Stored at `.obsidian/plugins/vault-organizer/data.json`, next to the
//! plugin that edits it. Rules are validated as soon as the file is loaded,
//! before any note is matched.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::rules::RuleSet;

/// Plugin data path, relative to the vault root
pub const CONFIG_FILE_PATH: &str = ".obsidian/plugins/vault-organizer/data.json";
pub const CONFIG_VERSION: u32 = 1;

/// When notes get organized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Only when explicitly asked
    #[default]
    Manual,
    /// On startup and after every note save
    Auto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default, rename = "scanMode")]
    pub scan_mode: ScanMode,

    #[serde(default)]
    pub rules: RuleSet,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            scan_mode: ScanMode::default(),
            rules: RuleSet::default(),
        }
    }
}

impl Config {
    pub fn path(vault_root: &Path) -> PathBuf {
        vault_root.join(CONFIG_FILE_PATH)
    }

    /// Load and validate the config. A missing file yields the defaults.
    pub fn load(vault_root: &Path) -> Result<Self, ConfigError> {
        let config_path = Self::path(vault_root);

        if !config_path.exists() {
            tracing::debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let config = Self::load_from_file(&config_path)?;
        if config.version > CONFIG_VERSION {
            tracing::warn!(
                "Config version {} is newer than supported version {}.",
                config.version,
                CONFIG_VERSION
            );
        }
        config.validate()?;
        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate().map_err(ConfigError::InvalidRules)
    }

    /// Validate, then write the config. Invalid rules are never persisted.
    pub fn save(&self, vault_root: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        let config_path = Self::path(vault_root);
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }
}
