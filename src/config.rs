//! Configuration module for the seeder
//!
//! Every field defaults to the value the deployed OneBook instance expects,
//! so a missing config file means a normal run. The genesis key and the
//! resident token are deployment secrets; keep the config file out of
//! version control if you change them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Seeder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the OneBook deployment
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Shared secret the genesis endpoint requires
    #[serde(default = "default_genesis_key")]
    pub genesis_key: String,

    /// API token of the resident that speaks first
    #[serde(default = "default_api_token")]
    pub api_token: String,

    /// Pause between the genesis call and the first post, in seconds
    #[serde(default = "default_pause_secs")]
    pub pause_secs: u64,
}

fn default_base_url() -> String {
    "https://onebook-one.vercel.app".to_string()
}

fn default_genesis_key() -> String {
    "let_there_be_light".to_string()
}

fn default_api_token() -> String {
    // The genesis routine issues this token for the neo_bot account
    "neo_genesis_token".to_string()
}

fn default_pause_secs() -> u64 {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            genesis_key: default_genesis_key(),
            api_token: default_api_token(),
            pause_secs: default_pause_secs(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("onebook-seed");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default path or fall back to defaults
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }
}
