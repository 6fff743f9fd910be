//! Authenticated encryption of single string fields.
//!
//! ChaCha20-Poly1305 with a fresh random nonce per call. The nonce,
//! ciphertext, and Poly1305 tag are base64-encoded into one opaque string so
//! callers never manage nonces separately.
//!
//! Because the mode is authenticated, `open` detects tampering, truncation,
//! AND a wrong key — all fail with [`CryptoError::Decryption`] instead of
//! returning plausible-looking garbage.

use crate::error::{CryptoError, CryptoResult};
use crate::key::DerivedKey;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;

/// ChaCha20-Poly1305 nonce size in bytes.
pub const NONCE_SIZE: usize = 12;

/// Poly1305 authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// Seals a plaintext string under the given key.
///
/// Output layout: `base64(nonce || ciphertext || tag)`. Each call draws a
/// fresh nonce from the OS RNG, so sealing the same plaintext twice yields
/// different ciphertexts.
pub fn seal(key: &DerivedKey, plaintext: &str) -> CryptoResult<String> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
        .map_err(|e| CryptoError::Encryption(format!("seal failed: {e}")))?;

    let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&ciphertext);

    Ok(STANDARD.encode(sealed))
}

/// Opens a sealed string produced by [`seal`].
///
/// Fails with [`CryptoError::Decryption`] when the input is malformed,
/// truncated, tampered with, or sealed under a different key.
pub fn open(key: &DerivedKey, sealed: &str) -> CryptoResult<String> {
    let bytes = STANDARD
        .decode(sealed)
        .map_err(|e| CryptoError::Decryption(format!("malformed ciphertext: {e}")))?;

    if bytes.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CryptoError::Decryption(format!(
            "truncated ciphertext: {} bytes",
            bytes.len()
        )));
    }

    let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_SIZE);
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| {
            CryptoError::Decryption("authentication failed (wrong key or tampered data)".to_string())
        })?;

    String::from_utf8(plaintext)
        .map_err(|_| CryptoError::Decryption("plaintext is not valid UTF-8".to_string()))
}
