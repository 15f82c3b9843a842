//! Base-URL configuration
//!
//! The probed service's base URL is supplied by the environment, not by
//! this crate: env var first, then a config file, then a built-in default.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_BASE_URL;

/// Environment variable overriding every other source
pub const BASE_URL_ENV: &str = "MINUTEMAN_BASE_URL";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Resolve the effective configuration
    ///
    /// A missing or unreadable config file is not an error; the probe page
    /// must come up regardless.
    pub fn load() -> Self {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                return Config {
                    base_url: normalize(&url),
                };
            }
        }
        Self::from_file(&Self::config_path()).unwrap_or_default()
    }

    /// Read one config file, normalizing the base URL
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        config.base_url = normalize(&config.base_url);
        Ok(config)
    }

    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".minuteman")
            .join("config.yaml")
    }
}

/// Strip whitespace and trailing slashes so path joining stays predictable
fn normalize(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_upstream() {
        assert_eq!(Config::default().base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "base_url: https://my-mirror.example/\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.base_url, "https://my-mirror.example");
    }

    #[test]
    fn test_from_file_missing_is_err() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::from_file(&dir.path().join("nope.yaml")).is_err());
    }

    #[test]
    fn test_normalize_strips_trailing_slashes() {
        assert_eq!(normalize(" https://a.example// "), "https://a.example");
        assert_eq!(normalize("https://a.example"), "https://a.example");
    }
}
