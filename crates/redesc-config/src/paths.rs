//! Configuration and data directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/redesc/`, `~/.cache/redesc/`
//! - macOS: `~/Library/Application Support/redesc/`, `~/Library/Caches/redesc/`
//! - Windows: `%APPDATA%\redesc\`, `%LOCALAPPDATA%\redesc\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "redesc";

/// Get the application config directory, creating it if needed
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the application cache directory, creating it if needed
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get path to app config file
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get path to the stored OAuth2 credentials
pub fn credentials_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("oauth2.json"))
}
