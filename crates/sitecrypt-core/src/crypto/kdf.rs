//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! The derived key is a pure function of (password, salt).
//! It is recomputed whenever it is needed and never written anywhere.

use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use super::material::Salt;
use crate::error::{Result, SiteCryptError};

/// PBKDF2 iteration count.
///
/// Fixed for every artifact and not configurable. The config record stores
/// it so a runtime consumer can check it.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256).
pub const KEY_LENGTH: usize = 32;

/// A symmetric key derived from a password.
///
/// Key material is zeroized from memory when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_LENGTH]) -> Self {
        Self { key: bytes }
    }

    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate cipher operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive a key from a password and salt with the fixed iteration count.
///
/// # Examples
///
/// ```
/// use sitecrypt_core::crypto::{derive_key, Salt};
///
/// let salt = Salt::from_bytes([7u8; 16]);
/// let a = derive_key(b"correct-horse-battery", &salt).unwrap();
/// let b = derive_key(b"correct-horse-battery", &salt).unwrap();
/// assert_eq!(a.as_bytes(), b.as_bytes());
/// ```
pub fn derive_key(password: &[u8], salt: &Salt) -> Result<DerivedKey> {
    if password.is_empty() {
        return Err(SiteCryptError::Derivation(
            "Password cannot be empty".to_string(),
        ));
    }

    let mut key_bytes = [0u8; KEY_LENGTH];
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt.as_bytes(), PBKDF2_ITERATIONS, &mut key_bytes);
    let key = DerivedKey::from_bytes(key_bytes);
    zeroize::Zeroize::zeroize(&mut key_bytes);

    Ok(key)
}
