use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const API_URL_ENV: &str = "TRAVEL_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelConfig {
    /// Base URL of the travel-api server, e.g. "http://localhost:8000"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Directory analytics reports are saved into
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
    /// Keep fetched trips, expense types and analytics for the session
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_cache_enabled() -> bool {
    true
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            download_dir: default_download_dir(),
            cache_enabled: default_cache_enabled(),
        }
    }
}

fn root_path() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Cannot determine config directory")?
        .join("travel-tui"))
}

impl TravelConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(root_path()?.join("config.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(root_path()?.join("travel-tui.log"))
    }

    /// Load config from disk, then apply the `TRAVEL_API_URL` override.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            Self::parse(&raw)
                .with_context(|| format!("Failed to parse config at {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_url = url;
            }
        }

        Ok(config)
    }

    fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = TravelConfig::parse("api_url = \"http://10.0.0.5:8000\"").unwrap();

        assert_eq!(config.api_url, "http://10.0.0.5:8000");
        assert_eq!(config.download_dir, PathBuf::from("."));
        assert!(config.cache_enabled);
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let raw = toml::to_string_pretty(&TravelConfig::default()).unwrap();
        assert_eq!(TravelConfig::parse(&raw).unwrap(), TravelConfig::default());
    }
}
