//! Application configuration
//!
//! Configuration loaded from `.redesc.toml`, overridden by `REDESC_*`
//! environment variables (a `.env` file in CWD is honoured).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration loaded from .redesc.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Playlist used when a command does not name one
    #[serde(default)]
    pub default_playlist_id: String,

    /// API key sent along with every YouTube Data API request
    #[serde(default)]
    pub youtube_api_key: String,

    /// Base URL of the YouTube Data API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Directory the change reports are written to
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    /// How many videos one invocation may change when `--limit` is omitted
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Maximum size of a single rendered diff chunk
    #[serde(default = "default_chunk_limit")]
    pub chunk_limit: usize,

    /// Maximum size of one review page, title and URL included
    #[serde(default = "default_page_limit")]
    pub page_limit: usize,
}

fn default_api_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_report_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_limit() -> usize {
    100
}

fn default_chunk_limit() -> usize {
    2000
}

fn default_page_limit() -> usize {
    4500
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_playlist_id: String::new(),
            youtube_api_key: String::new(),
            api_base_url: default_api_base_url(),
            report_dir: default_report_dir(),
            default_limit: default_limit(),
            chunk_limit: default_chunk_limit(),
            page_limit: default_page_limit(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then the config directory, or use defaults.
    /// Environment variables are applied on top.
    pub fn load() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {}", e);
        }

        let mut config = Self::from_file_or_default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    fn from_file_or_default() -> Self {
        if let Some(content) = crate::load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Override fields from `REDESC_*` variables resolved through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("REDESC_DEFAULT_PLAYLIST_ID") {
            self.default_playlist_id = value;
        }
        if let Some(value) = lookup("REDESC_YOUTUBE_API_KEY") {
            self.youtube_api_key = value;
        }
        if let Some(value) = lookup("REDESC_API_BASE_URL") {
            self.api_base_url = value;
        }
        if let Some(value) = lookup("REDESC_REPORT_DIR") {
            self.report_dir = PathBuf::from(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.default_playlist_id.is_empty());
        assert_eq!(config.api_base_url, "https://www.googleapis.com/youtube/v3");
        assert_eq!(config.report_dir, PathBuf::from("."));
        assert_eq!(config.default_limit, 100);
        assert_eq!(config.chunk_limit, 2000);
        assert_eq!(config.page_limit, 4500);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            default_playlist_id = "PL123"
            default_limit = 25
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.default_playlist_id, "PL123");
        assert_eq!(config.default_limit, 25);
        // Other fields should use defaults
        assert_eq!(config.chunk_limit, 2000);
        assert!(config.youtube_api_key.is_empty());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config: AppConfig = toml::from_str(r#"default_playlist_id = "PLfile""#).unwrap();
        let env: HashMap<&str, &str> = [
            ("REDESC_DEFAULT_PLAYLIST_ID", "PLenv"),
            ("REDESC_YOUTUBE_API_KEY", "key"),
            ("REDESC_REPORT_DIR", "/tmp/reports"),
        ]
        .into_iter()
        .collect();

        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.default_playlist_id, "PLenv");
        assert_eq!(config.youtube_api_key, "key");
        assert_eq!(config.report_dir, PathBuf::from("/tmp/reports"));
        assert_eq!(config.api_base_url, "https://www.googleapis.com/youtube/v3");
    }
}
