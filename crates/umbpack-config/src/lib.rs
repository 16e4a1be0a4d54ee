//! Configuration for the umbpack CLI
//!
//! Settings live in a TOML file, `~/.config/umbpack/umbpack.toml` by default.
//! `UMBPACK_CONFIG` points at a different file (used by tests and CI runs).
//! A missing file is not an error: every setting has a built-in default.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_ENV: &str = "UMBPACK_CONFIG";
pub const CONFIG_FILENAME: &str = "umbpack.toml";

pub const DEFAULT_REGISTRY_URL: &str = "https://api.github.com";
pub const DEFAULT_REGISTRY_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_UMBRACO_VERSION: &str = "8.0.0";
pub const DEFAULT_LICENCE: &str = "MIT";

/// Keys accepted by `umbpack config set`
pub const SETTABLE_KEYS: [&str; 5] = [
    "licence-registry-url",
    "registry-timeout-secs",
    "default-version",
    "default-umbraco-version",
    "default-licence",
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unknown config key: {0}. Supported keys: {keys}", keys = SETTABLE_KEYS.join(", "))]
    UnknownKey(String),

    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licence_registry_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_umbraco_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_licence: Option<String>,
    /// Extra licences accepted when the registry cannot be reached
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fallback_licences: BTreeMap<String, String>,
}

impl Config {
    pub fn path() -> PathBuf {
        // Explicit override for tests / isolated runs.
        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        config_dir().join(CONFIG_FILENAME)
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "licence-registry-url" => self.licence_registry_url.clone(),
            "registry-timeout-secs" => self.registry_timeout_secs.map(|s| s.to_string()),
            "default-version" => self.default_version.clone(),
            "default-umbraco-version" => self.default_umbraco_version.clone(),
            "default-licence" => self.default_licence.clone(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<(), ConfigError> {
        match key {
            "licence-registry-url" => self.licence_registry_url = Some(value),
            "registry-timeout-secs" => {
                let secs = value
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|s| *s > 0)
                    .ok_or_else(|| ConfigError::InvalidValue {
                        key: key.to_string(),
                        value: value.clone(),
                    })?;
                self.registry_timeout_secs = Some(secs);
            }
            "default-version" => self.default_version = Some(value),
            "default-umbraco-version" => self.default_umbraco_version = Some(value),
            "default-licence" => self.default_licence = Some(value),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.licence_registry_url.is_none()
            && self.registry_timeout_secs.is_none()
            && self.default_version.is_none()
            && self.default_umbraco_version.is_none()
            && self.default_licence.is_none()
            && self.fallback_licences.is_empty()
    }

    /// Explicitly set values, as `(key, value)` pairs for display
    pub fn values_iter(&self) -> Vec<(String, String)> {
        let mut values: Vec<(String, String)> = SETTABLE_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|v| (key.to_string(), v)))
            .collect();
        for (id, url) in &self.fallback_licences {
            values.push((format!("fallback-licences.{}", id), url.clone()));
        }
        values
    }

    pub fn registry_url(&self) -> &str {
        self.licence_registry_url
            .as_deref()
            .unwrap_or(DEFAULT_REGISTRY_URL)
    }

    pub fn registry_timeout(&self) -> Duration {
        Duration::from_secs(
            self.registry_timeout_secs
                .unwrap_or(DEFAULT_REGISTRY_TIMEOUT_SECS),
        )
    }

    pub fn version_default(&self) -> &str {
        self.default_version.as_deref().unwrap_or(DEFAULT_VERSION)
    }

    pub fn umbraco_version_default(&self) -> &str {
        self.default_umbraco_version
            .as_deref()
            .unwrap_or(DEFAULT_UMBRACO_VERSION)
    }

    pub fn licence_default(&self) -> &str {
        self.default_licence.as_deref().unwrap_or(DEFAULT_LICENCE)
    }
}

/// Directory holding the config file and the log file
pub fn config_dir() -> PathBuf {
    #[cfg(not(target_os = "windows"))]
    let base = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    #[cfg(target_os = "windows")]
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));

    base.join("umbpack")
}
