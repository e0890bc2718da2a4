use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::normalize::Units;

/// Environment variable that overrides the configured base URL.
pub const BASE_URL_ENV: &str = "WEATHER_API_BASE_URL";

/// Used when neither the environment nor the config file names a server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Shortcut cities offered next to the search box.
pub const DEFAULT_QUICK_CITIES: &[&str] =
    &["London", "New York", "Tokyo", "Paris", "Mumbai", "Sydney", "Dubai", "Singapore"];

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// base_url = "http://weather.internal:8080"
/// units = "imperial"
/// quick_cities = ["Oslo", "Lima"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: Option<String>,
    pub units: Units,
    pub quick_cities: Vec<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            units: Units::default(),
            quick_cities: DEFAULT_QUICK_CITIES.iter().map(|c| c.to_string()).collect(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Base URL with precedence env > file > default, without trailing slashes.
    pub fn resolved_base_url(&self) -> String {
        let from_env = std::env::var(BASE_URL_ENV).ok();
        self.base_url_with_override(from_env.as_deref())
    }

    fn base_url_with_override(&self, env_value: Option<&str>) -> String {
        env_value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .or_else(|| self.base_url.as_deref().map(str::trim).filter(|v| !v.is_empty()))
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// Store a base URL; blank input clears it.
    pub fn set_base_url(&mut self, url: &str) {
        let url = url.trim();
        self.base_url = (!url.is_empty()).then(|| url.to_string());
    }

    /// Load config from disk, or return the default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
