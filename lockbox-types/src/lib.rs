//! Shared data model for Lockbox.
//!
//! The central distinction is between [`PasswordEntry`] (the decrypted,
//! client-memory-only form) and [`EncryptedPasswordEntry`] (the wire/storage
//! form). Only the encrypted form implements serde — the plaintext form
//! cannot be serialized, so a plaintext password can never accidentally
//! cross a process or network boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category for a stored credential.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Social,
    Work,
    Finance,
    Shopping,
    #[default]
    Other,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Social,
        Category::Work,
        Category::Finance,
        Category::Shopping,
        Category::Other,
    ];

    /// Human-readable display label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Social => "Social Media",
            Category::Work => "Work",
            Category::Finance => "Finance",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }
}

/// A decrypted credential record.
///
/// Exists only in client memory after decryption. Deliberately does NOT
/// implement `Serialize`/`Deserialize`: the `password` field is plaintext
/// and must never be persisted or transmitted in this form.
#[derive(Clone, Debug, PartialEq)]
pub struct PasswordEntry {
    pub id: String,
    pub title: String,
    pub username: String,
    /// Plaintext password. Client memory only.
    pub password: String,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The wire/storage form of a credential record.
///
/// Identical to [`PasswordEntry`] except the password field holds an opaque
/// sealed ciphertext. This is the only form the backend or network ever
/// observes. Field names follow the Express/Mongoose API (`_id`, camelCase).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedPasswordEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub title: String,
    pub username: String,
    /// Sealed ciphertext: base64(nonce || ciphertext || tag).
    pub encrypted_password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new entry. Plaintext, client-side only.
#[derive(Clone, Debug)]
pub struct EntryDraft {
    pub title: String,
    pub username: String,
    /// Plaintext password; sealed by the lifecycle before any request.
    pub password: String,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub category: Category,
}

/// Partial update for an existing entry. Plaintext, client-side only.
///
/// `None` fields are left untouched on the server.
#[derive(Clone, Debug, Default)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub username: Option<String>,
    /// New plaintext password, re-sealed by the lifecycle when present.
    pub password: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub category: Option<Category>,
}

/// Authenticated user profile as issued by the auth service.
///
/// The salt is generated server-side at registration and is immutable for
/// the account's lifetime — every derived key depends on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub salt: String,
}
