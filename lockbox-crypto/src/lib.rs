//! Client-side encryption core for Lockbox.
//!
//! Provides everything the password manager needs to keep stored secrets
//! opaque to the backend:
//! - PBKDF2-HMAC-SHA256 key derivation from the master password
//! - ChaCha20-Poly1305 authenticated encryption of individual fields
//! - Cryptographically-random password generation
//! - A heuristic strength estimator for advisory display
//!
//! # Architecture
//!
//! The master password never leaves the client. At registration the auth
//! service issues a per-account random salt; `derive_key(password, salt)`
//! deterministically produces a 256-bit session key from the two. Every
//! stored password is sealed with that key before it touches the network,
//! so the backend only ever observes opaque ciphertext strings.
//!
//! All functions here are pure and synchronous: no I/O, no shared state,
//! safe to call concurrently. Key material is zeroized on drop and never
//! appears in `Debug` output.

mod cipher;
mod error;
mod generator;
mod key;
mod strength;

pub use cipher::{open, seal, NONCE_SIZE, TAG_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use generator::{generate, GeneratorOptions};
pub use key::{derive_key, generate_salt, DerivedKey, KEY_SIZE, PBKDF2_ROUNDS, SALT_SIZE};
pub use strength::{score, tier, StrengthTier};
