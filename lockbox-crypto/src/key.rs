//! Key derivation from the master password.
//!
//! PBKDF2-HMAC-SHA256 with 100 000 iterations, 256-bit output. The salt is
//! issued per account by the auth service at registration and is immutable
//! for the account's lifetime — the same (password, salt) pair must re-derive
//! the same key on every device and session, since the key itself is never
//! stored anywhere durable.

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Derived key length in bytes (256 bits).
pub const KEY_SIZE: usize = 32;

/// Salt length in bytes before hex encoding (128 bits).
pub const SALT_SIZE: usize = 16;

/// PBKDF2 iteration count. Slow by design to resist offline brute force.
pub const PBKDF2_ROUNDS: u32 = 100_000;

/// A 256-bit symmetric key derived from the master password.
///
/// Zeroized on drop. `Debug` output is redacted so key material can never
/// leak through logging.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_SIZE]);

impl DerivedKey {
    /// Returns the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Reconstructs a key from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}

/// Derives a session key from the master password and the account salt.
///
/// Deterministic and total: any two strings produce a key. Both inputs are
/// treated as opaque byte strings; length policy (e.g. minimum password
/// length at registration) is enforced by the caller.
pub fn derive_key(master_password: &str, salt: &str) -> DerivedKey {
    let mut out = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(
        master_password.as_bytes(),
        salt.as_bytes(),
        PBKDF2_ROUNDS,
        &mut out,
    );
    DerivedKey(out)
}

/// Generates a random hex-encoded salt (16 bytes of OS entropy).
pub fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
