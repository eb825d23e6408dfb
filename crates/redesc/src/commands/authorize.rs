//! `redesc authorize`: the installed-app OAuth2 consent flow

use anyhow::{Context, Result};
use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};
use yt_client::auth::LOOPBACK_REDIRECT_URI;
use yt_client::{ApiError, Authenticator};

pub async fn run() -> Result<()> {
    let auth = Authenticator::from_default_store()
        .context("Failed to load OAuth2 client credentials; save the client id and secret first")?;
    authorize(&auth).await
}

async fn authorize(auth: &Authenticator) -> Result<()> {
    let ticket = auth
        .guard()
        .try_acquire()
        .ok_or(ApiError::AuthorizationInProgress)?;

    let url = auth.consent_url(LOOPBACK_REDIRECT_URI).await?;
    println!("Open this page and allow access:\n\n{}\n", url);
    println!("Paste the `code` parameter of the page you are redirected to (empty line cancels):");

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("Failed to read the authorization code")?;

    let code = line.trim();
    if code.is_empty() {
        info!("Authorization cancelled by the operator");
        println!("Authorization cancelled.");
        return Ok(());
    }

    auth.exchange_code(&ticket, code, LOOPBACK_REDIRECT_URI).await?;
    println!("Authorized.");
    Ok(())
}
