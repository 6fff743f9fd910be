//! Request/response DTOs for the Lockbox API.

use lockbox_types::{Category, UserProfile};
use serde::{Deserialize, Serialize};

/// Response body for `/auth/register` and `/auth/login`.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Request body for `POST /passwords`. The password field is already
/// sealed; no plaintext type can reach this struct.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub title: String,
    pub username: String,
    pub encrypted_password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub category: Category,
}

/// Request body for `PUT /passwords/:id`. Absent fields are left untouched
/// server-side.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

/// Error body the API returns on failure.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

/// Snapshot of the authenticated session for durable storage by the host
/// application: bearer token plus cached profile. Never contains the master
/// password or the derived key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSession {
    pub token: String,
    pub user: UserProfile,
}
