//! Client configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the Lockbox client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL for the Lockbox API, including any path prefix
    /// (e.g., "https://api.lockbox.app/api").
    pub api_base_url: String,

    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Inactivity window in seconds before the session key is cleared.
    /// `None` disables auto-lock.
    pub auto_lock_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.lockbox.app/api".to_string(),
            request_timeout_secs: 30,
            auto_lock_secs: Some(900), // 15 minutes
        }
    }
}
