//! OAuth2 access for the YouTube client
//!
//! The [`Authenticator`] owns the stored credentials. It hands out access
//! tokens (refreshing them when expired) and runs the code exchange of the
//! installed-app authorization flow. Only one authorization flow may run per
//! process; [`AuthorizationGuard`] enforces that.

use crate::error::ApiError;
use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info, warn};
use redesc_config::OAuthCredentials;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// Redirect target the consent page sends the operator to
pub const LOOPBACK_REDIRECT_URI: &str = "http://127.0.0.1:8085";

/// Flag that admits at most one authorization flow at a time
#[derive(Debug, Default)]
pub struct AuthorizationGuard {
    running: AtomicBool,
}

/// Proof that the holder runs the authorization flow; releases the guard on drop
#[derive(Debug)]
pub struct AuthorizationTicket<'a> {
    guard: &'a AuthorizationGuard,
}

impl AuthorizationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the flow, or `None` if another one is running. Never waits.
    pub fn try_acquire(&self) -> Option<AuthorizationTicket<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| AuthorizationTicket { guard: self })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Drop for AuthorizationTicket<'_> {
    fn drop(&mut self) {
        self.guard.running.store(false, Ordering::Release);
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
    refresh_token: Option<String>,
}

fn default_expires_in() -> i64 {
    3600
}

/// Owner of the OAuth2 credentials used by the REST client
#[derive(Debug)]
pub struct Authenticator {
    http: reqwest::Client,
    credentials: Mutex<OAuthCredentials>,
    /// Where refreshed credentials are persisted; `None` keeps them in memory
    store: Option<PathBuf>,
    guard: AuthorizationGuard,
}

impl Authenticator {
    pub fn new(credentials: OAuthCredentials, store: Option<PathBuf>) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials: Mutex::new(credentials),
            store,
            guard: AuthorizationGuard::new(),
        }
    }

    /// Load credentials from the default location and persist changes there
    pub fn from_default_store() -> Result<Self> {
        let path = redesc_config::credentials_path()?;
        let credentials = OAuthCredentials::load_from_path(&path)?;
        Ok(Self::new(credentials, Some(path)))
    }

    pub fn guard(&self) -> &AuthorizationGuard {
        &self.guard
    }

    /// Whether API calls can be authorized without the operator
    pub async fn is_ready(&self) -> bool {
        let creds = self.credentials.lock().await;
        creds.is_valid() || creds.can_refresh()
    }

    /// Current access token, refreshed first when expired
    pub async fn access_token(&self) -> Result<String> {
        let mut creds = self.credentials.lock().await;

        if creds.is_valid() {
            if let Some(token) = &creds.token {
                return Ok(token.clone());
            }
        }

        if !creds.can_refresh() {
            return Err(ApiError::NotAuthorized("no valid access token".to_string()).into());
        }

        debug!("Access token expired, refreshing");
        let refresh_token = creds.refresh_token.clone().unwrap_or_default();
        let params = [
            ("client_id", creds.client_id.as_str()),
            ("client_secret", creds.client_secret.as_str()),
            ("refresh_token", refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = match self.request_token(&creds.token_uri, &params).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Failed to refresh OAuth2 token: {:#}", e);
                let reason = format!("token refresh failed: {:#}", e);
                return Err(ApiError::NotAuthorized(reason).into());
            }
        };

        let token = response.access_token.clone();
        self.apply_token(&mut creds, response)?;
        info!("Refreshed OAuth2 access token");
        Ok(token)
    }

    /// URL of the consent page the operator has to open
    pub async fn consent_url(&self, redirect_uri: &str) -> Result<String> {
        let creds = self.credentials.lock().await;
        let scopes = creds.scopes.join(" ");
        let url = url::Url::parse_with_params(
            &creds.auth_uri,
            &[
                ("client_id", creds.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("response_type", "code"),
                ("scope", scopes.as_str()),
                ("access_type", "offline"),
                ("prompt", "consent"),
            ],
        )
        .context("Invalid auth_uri in credentials")?;
        Ok(url.to_string())
    }

    /// Trade an authorization code for tokens and persist them
    ///
    /// Requires the ticket of a running authorization flow.
    pub async fn exchange_code(
        &self,
        _ticket: &AuthorizationTicket<'_>,
        code: &str,
        redirect_uri: &str,
    ) -> Result<()> {
        let mut creds = self.credentials.lock().await;
        let params = [
            ("client_id", creds.client_id.as_str()),
            ("client_secret", creds.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .request_token(&creds.token_uri, &params)
            .await
            .context("Failed to exchange authorization code")?;

        self.apply_token(&mut creds, response)?;
        info!("Authorization completed");
        Ok(())
    }

    async fn request_token(
        &self,
        token_uri: &str,
        params: &[(&str, &str)],
    ) -> Result<TokenResponse> {
        let response = self.http.post(token_uri).form(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message: body,
            }
            .into());
        }
        Ok(response.json().await?)
    }

    fn apply_token(&self, creds: &mut OAuthCredentials, response: TokenResponse) -> Result<()> {
        creds.set_token(response.access_token, response.expires_in, Utc::now());
        if let Some(refresh_token) = response.refresh_token {
            creds.refresh_token = Some(refresh_token);
        }
        if let Some(path) = &self.store {
            creds.save_to_path(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials(token_uri: &str) -> OAuthCredentials {
        let mut creds = OAuthCredentials::new("client", "secret");
        creds.token_uri = token_uri.to_string();
        creds
    }

    #[test]
    fn test_guard_rejects_second_acquire() {
        let guard = AuthorizationGuard::new();
        let ticket = guard.try_acquire();
        assert!(ticket.is_some());
        assert!(guard.is_running());
        assert!(guard.try_acquire().is_none());

        drop(ticket);
        assert!(!guard.is_running());
        assert!(guard.try_acquire().is_some());
    }

    #[tokio::test]
    async fn test_valid_token_is_returned_without_refresh() {
        let mut creds = credentials("http://127.0.0.1:1/token");
        creds.set_token("cached".to_string(), 3600, Utc::now());
        let auth = Authenticator::new(creds, None);

        assert_eq!(auth.access_token().await.unwrap(), "cached");
    }

    #[tokio::test]
    async fn test_missing_tokens_are_not_authorized() {
        let auth = Authenticator::new(credentials("http://127.0.0.1:1/token"), None);
        let err = auth.access_token().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::NotAuthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_expired_token_is_refreshed_and_persisted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "fresh",
                "expires_in": 3599
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("oauth2.json");
        let mut creds = credentials(&format!("{}/token", server.uri()));
        creds.refresh_token = Some("refresh".to_string());
        let auth = Authenticator::new(creds, Some(store.clone()));

        assert_eq!(auth.access_token().await.unwrap(), "fresh");

        let saved = OAuthCredentials::load_from_path(&store).unwrap();
        assert_eq!(saved.token.as_deref(), Some("fresh"));
        assert_eq!(saved.refresh_token.as_deref(), Some("refresh"));
        assert!(saved.is_valid());
    }

    #[tokio::test]
    async fn test_failed_refresh_asks_for_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
            .mount(&server)
            .await;

        let mut creds = credentials(&format!("{}/token", server.uri()));
        creds.refresh_token = Some("revoked".to_string());
        let auth = Authenticator::new(creds, None);

        let err = auth.access_token().await.unwrap_err();
        assert!(err.to_string().contains("redesc authorize"));
    }

    #[tokio::test]
    async fn test_exchange_code_stores_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "access",
                "expires_in": 3600,
                "refresh_token": "refresh"
            })))
            .mount(&server)
            .await;

        let auth = Authenticator::new(credentials(&format!("{}/token", server.uri())), None);
        let ticket = auth.guard().try_acquire().unwrap();
        auth.exchange_code(&ticket, "abc", LOOPBACK_REDIRECT_URI)
            .await
            .unwrap();
        drop(ticket);

        assert!(auth.is_ready().await);
        assert_eq!(auth.access_token().await.unwrap(), "access");
    }

    #[tokio::test]
    async fn test_consent_url_carries_client_and_scope() {
        let auth = Authenticator::new(OAuthCredentials::new("client", "secret"), None);
        let url = auth.consent_url(LOOPBACK_REDIRECT_URI).await.unwrap();

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/auth?"));
        assert!(url.contains("client_id=client"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("youtube.force-ssl"));
    }
}
