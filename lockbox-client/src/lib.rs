//! Client runtime for Lockbox.
//!
//! Ties the crypto core to the backend REST API:
//! - [`api_client::ApiClient`] — bearer-authenticated HTTP client for the
//!   auth and password-entry endpoints
//! - [`session::SessionKeyStore`] — process-local holder of the derived
//!   session key, with inactivity auto-lock
//! - [`vault::PasswordVault`] — the encrypted record lifecycle:
//!   encrypt-before-send, decrypt-after-fetch, re-encrypt-on-update
//!
//! The backend only ever sees [`lockbox_types::EncryptedPasswordEntry`];
//! plaintext passwords and the derived key never leave this process.

pub mod api_client;
pub mod config;
pub mod error;
pub mod session;
pub mod types;
pub mod vault;

pub use api_client::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use session::SessionKeyStore;
pub use vault::{open_entry, seal_entry, EntryResult, PasswordVault};
