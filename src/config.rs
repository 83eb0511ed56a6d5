//! Configuration Management
//!
//! Resolves host and API key for the provider and persists the last used host.
//! Precedence: explicit value > environment > config file > built-in default.
//! The API key is never written to disk.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the API host
pub const HOST_ENV: &str = "BDCC_HOST";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "BDCC_API_KEY";

/// Provider settings as handed to [`crate::provider::Provider::configure`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl ProviderConfig {
    /// Fill unset values from the process environment and the persisted config
    pub fn resolve(self, persisted: &Config) -> Self {
        self.resolve_with(persisted, |name| std::env::var(name).ok())
    }

    /// Same as [`ProviderConfig::resolve`] with an explicit environment lookup
    pub fn resolve_with<F>(self, persisted: &Config, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = non_empty(self.host)
            .or_else(|| non_empty(env(HOST_ENV)))
            .or_else(|| non_empty(persisted.host.clone()));
        let api_key = non_empty(self.api_key).or_else(|| non_empty(env(API_KEY_ENV)));

        Self { host, api_key }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Last used API host
    #[serde(default)]
    pub host: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bdcc").join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`; missing or unreadable files yield defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Set host and save
    pub fn set_host(&mut self, host: &str) -> Result<()> {
        self.host = Some(host.to_string());
        self.save()
    }
}
