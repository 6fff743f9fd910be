//! HTTP client for the Lockbox REST API.
//!
//! Handles bearer authentication and all auth/password-entry endpoints.
//! Uses reqwest with JSON serialization. Only the encrypted wire form of an
//! entry ever passes through here — sealing happens upstream in the
//! lifecycle layer.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::types::{ApiErrorBody, AuthResponse, CreateEntryRequest, SavedSession, UpdateEntryRequest};
use lockbox_types::{EncryptedPasswordEntry, UserProfile};
use reqwest::{Client, Response, StatusCode};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// State shared across API client clones.
struct AuthState {
    token: Option<String>,
    user: Option<UserProfile>,
}

/// HTTP client for the Lockbox backend.
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    auth: Arc<RwLock<AuthState>>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            config,
            auth: Arc::new(RwLock::new(AuthState {
                token: None,
                user: None,
            })),
        }
    }

    // ── Auth state ──

    pub async fn is_authenticated(&self) -> bool {
        self.auth.read().await.token.is_some()
    }

    /// Cached profile of the authenticated user.
    pub async fn profile(&self) -> Option<UserProfile> {
        self.auth.read().await.user.clone()
    }

    pub async fn logout(&self) {
        let mut auth = self.auth.write().await;
        auth.token = None;
        auth.user = None;
    }

    /// Returns the current session for durable persistence by the host app.
    pub async fn saved_session(&self) -> Option<SavedSession> {
        let auth = self.auth.read().await;
        Some(SavedSession {
            token: auth.token.clone()?,
            user: auth.user.clone()?,
        })
    }

    /// Restores a previously saved session (token + cached profile).
    pub async fn restore_session(&self, saved: SavedSession) {
        let mut auth = self.auth.write().await;
        auth.token = Some(saved.token);
        auth.user = Some(saved.user);
    }

    // ── Auth endpoints ──

    pub async fn register(&self, email: &str, master_password: &str) -> ClientResult<UserProfile> {
        self.authenticate("/auth/register", email, master_password)
            .await
    }

    pub async fn login(&self, email: &str, master_password: &str) -> ClientResult<UserProfile> {
        self.authenticate("/auth/login", email, master_password)
            .await
    }

    async fn authenticate(
        &self,
        path: &str,
        email: &str,
        master_password: &str,
    ) -> ClientResult<UserProfile> {
        let url = format!("{}{}", self.config.api_base_url, path);
        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "email": email, "masterPassword": master_password }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ClientError::AuthFailed(error_message(resp).await));
        }

        let auth_resp: AuthResponse = resp.json().await?;
        debug!("authenticated as user {}", auth_resp.user.id);

        let mut auth = self.auth.write().await;
        auth.token = Some(auth_resp.token);
        auth.user = Some(auth_resp.user.clone());

        Ok(auth_resp.user)
    }

    /// Fetches the authenticated user's profile from the server and
    /// refreshes the cached copy.
    pub async fn current_user(&self) -> ClientResult<UserProfile> {
        let resp = self.auth_get("/auth/me").await?;
        let resp = ensure_success(resp, "user").await?;
        let user: UserProfile = resp.json().await?;

        let mut auth = self.auth.write().await;
        auth.user = Some(user.clone());
        Ok(user)
    }

    /// Deletes the account and all its entries, then clears local auth state.
    pub async fn delete_account(&self) -> ClientResult<()> {
        let resp = self.auth_delete("/auth/account").await?;
        ensure_success(resp, "account").await?;
        self.logout().await;
        Ok(())
    }

    // ── Password entries ──

    pub async fn list_entries(&self) -> ClientResult<Vec<EncryptedPasswordEntry>> {
        let resp = self.auth_get("/passwords").await?;
        let resp = ensure_success(resp, "entries").await?;
        Ok(resp.json().await?)
    }

    pub async fn create_entry(
        &self,
        req: &CreateEntryRequest,
    ) -> ClientResult<EncryptedPasswordEntry> {
        let url = format!("{}/passwords", self.config.api_base_url);
        let token = self.token().await?;
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(req)
            .send()
            .await?;
        let resp = ensure_success(resp, "entry").await?;
        Ok(resp.json().await?)
    }

    pub async fn update_entry(
        &self,
        id: &str,
        req: &UpdateEntryRequest,
    ) -> ClientResult<EncryptedPasswordEntry> {
        let url = format!("{}/passwords/{id}", self.config.api_base_url);
        let token = self.token().await?;
        let resp = self
            .client
            .put(&url)
            .bearer_auth(&token)
            .json(req)
            .send()
            .await?;
        let resp = ensure_success(resp, "entry").await?;
        Ok(resp.json().await?)
    }

    pub async fn delete_entry(&self, id: &str) -> ClientResult<()> {
        let resp = self.auth_delete(&format!("/passwords/{id}")).await?;
        ensure_success(resp, "entry").await?;
        Ok(())
    }

    pub async fn search_entries(&self, query: &str) -> ClientResult<Vec<EncryptedPasswordEntry>> {
        let url = format!("{}/passwords/search", self.config.api_base_url);
        let token = self.token().await?;
        let resp = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .bearer_auth(&token)
            .send()
            .await?;
        let resp = ensure_success(resp, "entries").await?;
        Ok(resp.json().await?)
    }

    // ── Helpers ──

    async fn auth_get(&self, path: &str) -> ClientResult<Response> {
        let url = format!("{}{}", self.config.api_base_url, path);
        let token = self.token().await?;
        Ok(self.client.get(&url).bearer_auth(&token).send().await?)
    }

    async fn auth_delete(&self, path: &str) -> ClientResult<Response> {
        let url = format!("{}{}", self.config.api_base_url, path);
        let token = self.token().await?;
        Ok(self.client.delete(&url).bearer_auth(&token).send().await?)
    }

    async fn token(&self) -> ClientResult<String> {
        self.auth
            .read()
            .await
            .token
            .clone()
            .ok_or(ClientError::AuthRequired)
    }
}

/// Maps a non-success response to the error taxonomy.
async fn ensure_success(resp: Response, what: &str) -> ClientResult<Response> {
    let status = resp.status();
    if status == StatusCode::UNAUTHORIZED {
        debug!("401 response, bearer token rejected");
        return Err(ClientError::AuthRequired);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound(what.to_string()));
    }
    if !status.is_success() {
        return Err(ClientError::Api(error_message(resp).await));
    }
    Ok(resp)
}

/// Extracts the server's human-readable `{ message }` body, falling back to
/// the status code.
async fn error_message(resp: Response) -> String {
    let status = resp.status();
    match resp.json::<ApiErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => format!("request failed with status {status}"),
    }
}
