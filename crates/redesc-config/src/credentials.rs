//! OAuth2 credential persistence
//!
//! Credentials are stored as JSON in `~/.config/redesc/oauth2.json`.
//! The client registration (`client_id`, `client_secret`, URIs) is entered by
//! hand once; tokens are written back after every authorization or refresh.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::paths;

/// Scope needed to edit video metadata
pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/youtube.force-ssl";

/// Stored OAuth2 client registration and tokens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

fn default_auth_uri() -> String {
    "https://accounts.google.com/o/oauth2/auth".to_string()
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_scopes() -> Vec<String> {
    vec![DEFAULT_SCOPE.to_string()]
}

impl OAuthCredentials {
    /// Create credentials for a client registration without any tokens yet
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_uri: default_auth_uri(),
            token_uri: default_token_uri(),
            token: None,
            refresh_token: None,
            expiry: None,
            scopes: default_scopes(),
        }
    }

    /// Load credentials from the default location
    pub fn load() -> Result<Self> {
        let path = paths::credentials_path()?;
        Self::load_from_path(&path)
    }

    /// Load credentials from specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read credentials file: {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse credentials file: {:?}", path))
    }

    /// Save credentials to the default location
    pub fn save(&self) -> Result<()> {
        let path = paths::credentials_path()?;
        self.save_to_path(&path)
    }

    /// Save credentials to specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize credentials")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write credentials file: {:?}", path))?;

        log::info!("Saved OAuth2 credentials to {:?}", path);
        Ok(())
    }

    /// An access token exists and has not expired at `now`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        match (&self.token, self.expiry) {
            (Some(token), Some(expiry)) => !token.is_empty() && expiry > now,
            _ => false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Whether an expired token can be renewed without the operator
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Store a freshly issued access token
    pub fn set_token(&mut self, token: String, expires_in_secs: i64, now: DateTime<Utc>) {
        self.token = Some(token);
        self.expiry = Some(now + chrono::Duration::seconds(expires_in_secs));
    }
}
