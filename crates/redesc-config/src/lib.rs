//! Configuration and file management for redesc
//!
//! This crate provides:
//! - Platform paths for config, cache and credential files
//! - Configuration file loading (TOML) with `REDESC_*` environment overrides
//! - Application configuration (AppConfig)
//! - OAuth2 credential persistence

pub mod app_config;
pub mod config_file;
pub mod credentials;
pub mod paths;

pub use app_config::AppConfig;
pub use config_file::load_config_file;
pub use credentials::{OAuthCredentials, DEFAULT_SCOPE};
pub use paths::{cache_dir, config_dir, credentials_path};
