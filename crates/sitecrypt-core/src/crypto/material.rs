//! Per-build random salt and IV.
//!
//! Both are drawn fresh from the OS CSPRNG on every build and are never
//! reused. Neither is secret; they are persisted as hex in the config record.

use std::fmt;

use crate::error::{Result, SiteCryptError};

/// Salt length in bytes.
pub const SALT_LENGTH: usize = 16;

/// AES-GCM nonce length in bytes (96 bits).
pub const IV_LENGTH: usize = 12;

fn fill_random(buf: &mut [u8]) -> Result<()> {
    getrandom::getrandom(buf)
        .map_err(|e| SiteCryptError::Randomness(format!("Failed to gather randomness: {}", e)))
}

fn decode_fixed<const N: usize>(label: &str, value: &str) -> Result<[u8; N]> {
    let bytes = hex::decode(value)
        .map_err(|e| SiteCryptError::Decoding(format!("{} is not valid hex: {}", label, e)))?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        SiteCryptError::Decoding(format!(
            "{} must be {} bytes (got {})",
            label,
            N,
            bytes.len()
        ))
    })
}

/// Random salt mixed into key derivation.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Salt([u8; SALT_LENGTH]);

impl Salt {
    /// Generate a fresh random salt.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; SALT_LENGTH];
        fill_random(&mut bytes)?;
        Ok(Self(bytes))
    }

    pub fn from_bytes(bytes: [u8; SALT_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse a salt from its hex form.
    pub fn from_hex(value: &str) -> Result<Self> {
        decode_fixed("salt", value).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Salt({})", self.to_hex())
    }
}

/// Random per-encryption nonce.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Iv([u8; IV_LENGTH]);

impl Iv {
    /// Generate a fresh random IV.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; IV_LENGTH];
        fill_random(&mut bytes)?;
        Ok(Self(bytes))
    }

    pub fn from_bytes(bytes: [u8; IV_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse an IV from its hex form.
    pub fn from_hex(value: &str) -> Result<Self> {
        decode_fixed("iv", value).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; IV_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Iv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iv({})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_salts_differ() {
        let a = Salt::generate().unwrap();
        let b = Salt::generate().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_generated_ivs_differ() {
        let a = Iv::generate().unwrap();
        let b = Iv::generate().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hex_parse_matches_encode() {
        let salt = Salt::from_bytes([0xab; SALT_LENGTH]);
        assert_eq!(salt.to_hex(), "ab".repeat(SALT_LENGTH));
        assert_eq!(Salt::from_hex(&salt.to_hex()).unwrap(), salt);
    }

    #[test]
    fn test_wrong_length_rejected() {
        let err = Iv::from_hex("00112233").unwrap_err();
        assert!(err.to_string().contains("iv must be 12 bytes (got 4)"));
    }

    #[test]
    fn test_invalid_hex_rejected() {
        let err = Salt::from_hex("not-hex").unwrap_err();
        assert!(matches!(err, SiteCryptError::Decoding(_)));
    }
}
