//! One module per subcommand

pub mod authorize;
pub mod backfill_tags;
pub mod substitute;

use anyhow::{bail, Context, Result};
use redesc_config::AppConfig;
use std::sync::Arc;
use yt_client::{ApiError, Authenticator, YouTubeRestClient, DEFAULT_BASE_URL};

/// REST client authorized with the stored credentials
pub fn connect(config: &AppConfig) -> Result<YouTubeRestClient> {
    let auth = Authenticator::from_default_store()
        .context("Failed to load OAuth2 credentials, run `redesc authorize` first")?;

    let base_url = if config.api_base_url.is_empty() {
        DEFAULT_BASE_URL
    } else {
        config.api_base_url.as_str()
    };

    Ok(YouTubeRestClient::new(
        base_url,
        config.youtube_api_key.as_str(),
        Arc::new(auth),
    ))
}

/// Fail before any listing when calls could not be authorized
pub async fn ensure_authorized(client: &YouTubeRestClient) -> Result<()> {
    if !client.authenticator().is_ready().await {
        return Err(ApiError::NotAuthorized("no usable access or refresh token".to_string()).into());
    }
    Ok(())
}

/// The playlist named on the command line, else the configured default
pub fn resolve_playlist(requested: Option<String>, config: &AppConfig) -> Result<String> {
    match requested {
        Some(id) if !id.is_empty() => Ok(id),
        _ if !config.default_playlist_id.is_empty() => Ok(config.default_playlist_id.clone()),
        _ => bail!("No playlist given; pass --playlist or set default_playlist_id"),
    }
}
