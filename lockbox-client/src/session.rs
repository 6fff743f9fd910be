//! Session-scoped holder of the derived encryption key.
//!
//! The key lives here for the duration of one authenticated session and
//! nowhere else: never on disk, never on the wire, never in logs. `clear()`
//! runs on logout and account deletion; an optional inactivity window locks
//! the store automatically, after which every decryption fails until the
//! key is re-derived at the next login.
//!
//! Single-writer semantics: only login/logout/auto-lock mutate the key;
//! any number of encrypt/decrypt calls may read it concurrently.

use lockbox_crypto::DerivedKey;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::debug;

struct SessionState {
    key: DerivedKey,
    last_used: Instant,
}

/// Process-local, non-persistent store for the session key.
pub struct SessionKeyStore {
    state: RwLock<Option<SessionState>>,
    auto_lock: Option<Duration>,
}

impl SessionKeyStore {
    /// Creates a store; `auto_lock` is the inactivity window after which
    /// the key is discarded (`None` disables auto-lock).
    pub fn new(auto_lock: Option<Duration>) -> Self {
        Self {
            state: RwLock::new(None),
            auto_lock,
        }
    }

    /// Installs a freshly derived key, starting a new session.
    pub fn set(&self, key: DerivedKey) {
        let mut state = self.state.write().unwrap();
        *state = Some(SessionState {
            key,
            last_used: Instant::now(),
        });
    }

    /// Returns the session key, refreshing the inactivity clock.
    ///
    /// Returns `None` when no key is set or the inactivity window has
    /// passed (in which case the key is discarded).
    pub fn get(&self) -> Option<DerivedKey> {
        let mut state = self.state.write().unwrap();
        match state.as_mut() {
            None => None,
            Some(s) => {
                if let Some(window) = self.auto_lock {
                    if s.last_used.elapsed() >= window {
                        debug!("session key auto-locked after inactivity");
                        *state = None;
                        return None;
                    }
                }
                s.last_used = Instant::now();
                Some(s.key.clone())
            }
        }
    }

    /// Discards the key. All decryption fails until `set` runs again.
    pub fn clear(&self) {
        let mut state = self.state.write().unwrap();
        *state = None;
    }

    /// Whether a non-expired key is currently held. Does not refresh the
    /// inactivity clock.
    pub fn is_unlocked(&self) -> bool {
        let state = self.state.read().unwrap();
        match state.as_ref() {
            None => false,
            Some(s) => match self.auto_lock {
                Some(window) => s.last_used.elapsed() < window,
                None => true,
            },
        }
    }
}
