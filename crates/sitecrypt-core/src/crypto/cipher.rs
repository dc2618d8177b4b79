//! AES-256-GCM encryption and decryption.
//!
//! One authenticated mode on every path. The 16-byte tag is appended to the
//! ciphertext; a tag that does not verify surfaces as
//! [`SiteCryptError::AuthenticationFailed`] and no plaintext is returned.
//!
//! **Never reuse an IV with the same key.** GCM nonce reuse breaks both
//! confidentiality and authentication.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};

use super::kdf::DerivedKey;
use super::material::Iv;
use crate::error::{Result, SiteCryptError};

/// Length of the GCM authentication tag appended to every ciphertext.
pub const TAG_LENGTH: usize = 16;

fn build_cipher(key: &DerivedKey) -> Result<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| SiteCryptError::Encryption(format!("Invalid key length: {}", e)))
}

/// Encrypt `plaintext` under `key` and `iv`, returning `ciphertext || tag`.
///
/// Deterministic for a given (key, iv, plaintext).
pub fn encrypt(key: &DerivedKey, iv: &Iv, plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = build_cipher(key)?;
    cipher
        .encrypt(Nonce::from_slice(iv.as_bytes()), plaintext)
        .map_err(|_| SiteCryptError::Encryption("AES-GCM encryption failed".to_string()))
}

/// Decrypt `ciphertext || tag` under `key` and `iv`.
///
/// # Errors
///
/// - [`SiteCryptError::Decoding`] if the input is shorter than the tag
/// - [`SiteCryptError::AuthenticationFailed`] if the tag does not verify
pub fn decrypt(key: &DerivedKey, iv: &Iv, ciphertext: &[u8]) -> Result<Vec<u8>> {
    if ciphertext.len() < TAG_LENGTH {
        return Err(SiteCryptError::Decoding(format!(
            "Ciphertext is {} bytes, shorter than the {}-byte tag",
            ciphertext.len(),
            TAG_LENGTH
        )));
    }
    let cipher = build_cipher(key)?;
    cipher
        .decrypt(Nonce::from_slice(iv.as_bytes()), ciphertext)
        .map_err(|_| SiteCryptError::AuthenticationFailed)
}
