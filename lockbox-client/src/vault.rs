//! Encrypted record lifecycle.
//!
//! Orchestrates auth, key derivation, and the seal/open boundary: entries
//! are sealed before every create/update request and opened after every
//! fetch, so only [`EncryptedPasswordEntry`] ever crosses the network.
//!
//! List decryption isolates per-record failures: each fetched entry maps to
//! its own `Result`, and one corrupt ciphertext never aborts the batch.

use crate::api_client::ApiClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionKeyStore;
use crate::types::{CreateEntryRequest, SavedSession, UpdateEntryRequest};
use lockbox_crypto::{derive_key, open, seal, CryptoError, CryptoResult, DerivedKey};
use lockbox_types::{EncryptedPasswordEntry, EntryDraft, EntryPatch, PasswordEntry, UserProfile};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Minimum master password length enforced at registration.
const MIN_MASTER_PASSWORD_LEN: usize = 8;

/// Result of decrypting one fetched record.
pub type EntryResult = Result<PasswordEntry, CryptoError>;

/// The top-level client service: API access plus the session key lifecycle.
///
/// Holds the session key store as an explicit service object — components
/// that encrypt or decrypt receive it by reference, never through ambient
/// global state.
pub struct PasswordVault {
    api: Arc<ApiClient>,
    session: Arc<SessionKeyStore>,
}

impl PasswordVault {
    pub fn new(config: ClientConfig) -> Self {
        let auto_lock = config.auto_lock_secs.map(Duration::from_secs);
        Self {
            api: Arc::new(ApiClient::new(config)),
            session: Arc::new(SessionKeyStore::new(auto_lock)),
        }
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn session(&self) -> &Arc<SessionKeyStore> {
        &self.session
    }

    // ── Auth ──

    /// Registers a new account. Validation runs before any network or
    /// crypto call; on success the session key is derived from the
    /// server-issued salt and installed.
    pub async fn register(
        &self,
        email: &str,
        master_password: &str,
        confirm: &str,
    ) -> ClientResult<UserProfile> {
        validate_registration(email, master_password, confirm)?;

        let user = self.api.register(email, master_password).await?;
        self.session.set(derive_key(master_password, &user.salt));
        Ok(user)
    }

    /// Logs in and derives the session key from the account's salt.
    pub async fn login(&self, email: &str, master_password: &str) -> ClientResult<UserProfile> {
        let user = self.api.login(email, master_password).await?;
        self.session.set(derive_key(master_password, &user.salt));
        Ok(user)
    }

    /// Clears the session key and auth state.
    pub async fn logout(&self) {
        self.session.clear();
        self.api.logout().await;
    }

    /// Deletes the account (cascading all entries server-side), then clears
    /// the session key.
    pub async fn delete_account(&self) -> ClientResult<()> {
        self.api.delete_account().await?;
        self.session.clear();
        Ok(())
    }

    /// Resumes a saved session. The derived key is not persisted anywhere,
    /// so the master password must be re-entered to re-derive it.
    pub async fn resume(
        &self,
        saved: SavedSession,
        master_password: &str,
    ) -> ClientResult<UserProfile> {
        self.session
            .set(derive_key(master_password, &saved.user.salt));
        let user = saved.user.clone();
        self.api.restore_session(saved).await;
        Ok(user)
    }

    /// Current session snapshot for durable storage by the host app.
    pub async fn saved_session(&self) -> Option<SavedSession> {
        self.api.saved_session().await
    }

    // ── Entries ──

    /// Fetches and decrypts all entries. Each record decrypts
    /// independently; corrupt ones surface as `Err` without blocking the
    /// rest.
    pub async fn list_entries(&self) -> ClientResult<Vec<EntryResult>> {
        let key = self.current_key()?;
        let wires = self.api.list_entries().await?;
        Ok(decrypt_all(&wires, &key))
    }

    /// Server-side search, decrypted the same way as a full list.
    pub async fn search_entries(&self, query: &str) -> ClientResult<Vec<EntryResult>> {
        let key = self.current_key()?;
        let wires = self.api.search_entries(query).await?;
        Ok(decrypt_all(&wires, &key))
    }

    /// Seals the draft's password, creates the entry, and round-trips the
    /// server's response back through `open_entry` under the same key.
    pub async fn create_entry(&self, draft: &EntryDraft) -> ClientResult<PasswordEntry> {
        let key = self.current_key()?;
        let req = seal_entry(draft, &key)?;
        let wire = self.api.create_entry(&req).await?;
        Ok(open_entry(&wire, &key)?)
    }

    /// Applies a partial update. Only a changed password is re-sealed;
    /// every other field passes through verbatim.
    pub async fn update_entry(&self, id: &str, patch: EntryPatch) -> ClientResult<PasswordEntry> {
        let key = self.current_key()?;

        let encrypted_password = match patch.password.as_deref() {
            Some(plaintext) => Some(seal(&key, plaintext)?),
            None => None,
        };

        let req = UpdateEntryRequest {
            title: patch.title,
            username: patch.username,
            encrypted_password,
            url: patch.url,
            notes: patch.notes,
            category: patch.category,
        };

        let wire = self.api.update_entry(id, &req).await?;
        Ok(open_entry(&wire, &key)?)
    }

    /// Deletes an entry. No cryptographic involvement.
    pub async fn delete_entry(&self, id: &str) -> ClientResult<()> {
        self.api.delete_entry(id).await
    }

    /// Nothing is sealed or opened before a session key exists.
    fn current_key(&self) -> ClientResult<DerivedKey> {
        self.session.get().ok_or(ClientError::SessionLocked)
    }
}

/// Converts a plaintext draft to its wire form, sealing only the password.
pub fn seal_entry(draft: &EntryDraft, key: &DerivedKey) -> CryptoResult<CreateEntryRequest> {
    Ok(CreateEntryRequest {
        title: draft.title.clone(),
        username: draft.username.clone(),
        encrypted_password: seal(key, &draft.password)?,
        url: draft.url.clone(),
        notes: draft.notes.clone(),
        category: draft.category,
    })
}

/// Converts a wire entry back to its decrypted form.
///
/// Fails with [`CryptoError::Decryption`] when the ciphertext is corrupt or
/// was sealed under a different key.
pub fn open_entry(wire: &EncryptedPasswordEntry, key: &DerivedKey) -> CryptoResult<PasswordEntry> {
    let password = open(key, &wire.encrypted_password)?;
    Ok(PasswordEntry {
        id: wire.id.clone(),
        title: wire.title.clone(),
        username: wire.username.clone(),
        password,
        url: wire.url.clone(),
        notes: wire.notes.clone(),
        category: wire.category,
        created_at: wire.created_at,
        updated_at: wire.updated_at,
    })
}

fn decrypt_all(wires: &[EncryptedPasswordEntry], key: &DerivedKey) -> Vec<EntryResult> {
    wires
        .iter()
        .map(|wire| {
            open_entry(wire, key).map_err(|e| {
                warn!("failed to decrypt entry {}: {e}", wire.id);
                e
            })
        })
        .collect()
}

fn validate_registration(email: &str, master_password: &str, confirm: &str) -> ClientResult<()> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ClientError::Validation(
            "Please enter a valid email address.".to_string(),
        ));
    }
    if master_password.chars().count() < MIN_MASTER_PASSWORD_LEN {
        return Err(ClientError::Validation(format!(
            "Master password must be at least {MIN_MASTER_PASSWORD_LEN} characters."
        )));
    }
    if master_password != confirm {
        return Err(ClientError::Validation(
            "Passwords do not match.".to_string(),
        ));
    }
    Ok(())
}
