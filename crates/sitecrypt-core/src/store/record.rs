//! The `{salt, iv}` config record persisted beside the ciphertext.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::crypto::{Iv, Salt, PBKDF2_ITERATIONS};
use crate::error::{Result, SiteCryptError};

/// Current record format version.
pub const RECORD_VERSION: u32 = 1;

/// Cipher identifier written to the record.
pub const CIPHER_ALGORITHM: &str = "AES-256-GCM";

/// KDF identifier written to the record.
pub const KDF_ALGORITHM: &str = "PBKDF2-HMAC-SHA256";

/// On-disk JSON shape of the config record.
///
/// `s` and `iv` keep the short key names runtime consumers already read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRecord {
    pub v: u32,
    pub alg: String,
    pub kdf: String,
    pub iter: u32,
    pub s: String,
    pub iv: String,
    /// SHA-256 (hex) of the ciphertext file contents this record belongs to
    pub ct: String,
}

impl ConfigRecord {
    /// Build the record for a ciphertext file body.
    pub fn new(salt: &Salt, iv: &Iv, ciphertext_text: &str) -> Self {
        Self {
            v: RECORD_VERSION,
            alg: CIPHER_ALGORITHM.to_string(),
            kdf: KDF_ALGORITHM.to_string(),
            iter: PBKDF2_ITERATIONS,
            s: salt.to_hex(),
            iv: iv.to_hex(),
            ct: ciphertext_digest(ciphertext_text),
        }
    }

    /// Parse and validate a record read from disk.
    pub fn parse(text: &str) -> Result<Self> {
        let record: ConfigRecord = serde_json::from_str(text)
            .map_err(|e| SiteCryptError::Decoding(format!("Malformed config record: {}", e)))?;
        record.check_parameters()?;
        Ok(record)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn check_parameters(&self) -> Result<()> {
        if self.v != RECORD_VERSION {
            return Err(SiteCryptError::Decoding(format!(
                "Unsupported record version {} (expected {})",
                self.v, RECORD_VERSION
            )));
        }
        if self.alg != CIPHER_ALGORITHM {
            return Err(SiteCryptError::Decoding(format!(
                "Unsupported cipher \"{}\"",
                self.alg
            )));
        }
        if self.kdf != KDF_ALGORITHM {
            return Err(SiteCryptError::Decoding(format!(
                "Unsupported key derivation \"{}\"",
                self.kdf
            )));
        }
        if self.iter != PBKDF2_ITERATIONS {
            return Err(SiteCryptError::Decoding(format!(
                "Unexpected iteration count {} (expected {})",
                self.iter, PBKDF2_ITERATIONS
            )));
        }
        Ok(())
    }

    pub fn salt(&self) -> Result<Salt> {
        Salt::from_hex(&self.s)
    }

    pub fn iv(&self) -> Result<Iv> {
        Iv::from_hex(&self.iv)
    }

    /// Whether this record was written for `ciphertext_text`.
    pub fn matches(&self, ciphertext_text: &str) -> bool {
        self.ct == ciphertext_digest(ciphertext_text)
    }
}

/// Hex SHA-256 of the ciphertext file body.
pub fn ciphertext_digest(ciphertext_text: &str) -> String {
    hex::encode(Sha256::digest(ciphertext_text.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConfigRecord {
        ConfigRecord::new(
            &Salt::from_bytes([1u8; 16]),
            &Iv::from_bytes([2u8; 12]),
            "deadbeef",
        )
    }

    #[test]
    fn test_record_json_shape() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["v"], 1);
        assert_eq!(value["alg"], "AES-256-GCM");
        assert_eq!(value["iter"], 100_000);
        assert_eq!(value["s"], "01".repeat(16));
        assert_eq!(value["iv"], "02".repeat(12));
    }

    #[test]
    fn test_parse_rejects_other_version() {
        let mut record = sample();
        record.v = 2;
        let err = ConfigRecord::parse(&record.to_json().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Unsupported record version 2"));
    }

    #[test]
    fn test_parse_rejects_other_iteration_count() {
        let mut record = sample();
        record.iter = 10_000;
        let err = ConfigRecord::parse(&record.to_json().unwrap()).unwrap_err();
        assert!(matches!(err, SiteCryptError::Decoding(_)));
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let err = ConfigRecord::parse(r#"{"s":"00","iv":"00"}"#).unwrap_err();
        assert!(err.to_string().contains("Malformed config record"));
    }

    #[test]
    fn test_matches_tracks_ciphertext() {
        let record = sample();
        assert!(record.matches("deadbeef"));
        assert!(!record.matches("deadbeee"));
    }
}
