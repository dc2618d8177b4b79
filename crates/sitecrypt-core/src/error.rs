//! Error types for sitecrypt core operations.
//!
//! Every failure is terminal for a build. The variants map onto the pipeline
//! stage that failed; the CLI layer maps them to exit codes and messages.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for sitecrypt operations.
pub type Result<T> = std::result::Result<T, SiteCryptError>;

/// Core error type for sitecrypt operations.
#[derive(Debug, Error)]
pub enum SiteCryptError {
    /// No password was supplied
    #[error("Password is required")]
    MissingPassword,

    /// Invalid caller input (password policy, bad arguments)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Source document could not be loaded or canonicalized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// OS randomness was unavailable while generating salt or IV
    #[error("Randomness unavailable: {0}")]
    Randomness(String),

    /// Key derivation rejected its inputs
    #[error("Key derivation error: {0}")]
    Derivation(String),

    /// Cipher rejected its inputs
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Authentication tag did not verify (wrong password, salt, iv, or tampered data)
    #[error("Authentication failed: ciphertext does not verify under the derived key")]
    AuthenticationFailed,

    /// Persisted artifact could not be decoded
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Decrypted bytes differ from the original plaintext
    #[error("Verification failed: decrypted plaintext does not match the source")]
    VerificationMismatch,

    /// Ciphertext and record on disk do not belong together
    #[error("Torn artifact: {0}")]
    TornArtifact(String),

    /// An expected artifact file does not exist
    #[error("Artifact not found: {}", .0.display())]
    ArtifactMissing(PathBuf),

    /// Filesystem error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SiteCryptError {
    /// Name of the pipeline stage the error belongs to, for diagnostics.
    pub fn stage(&self) -> &'static str {
        match self {
            SiteCryptError::MissingPassword | SiteCryptError::InvalidInput(_) => "precondition",
            SiteCryptError::Serialization(_) => "serialize",
            SiteCryptError::Randomness(_) => "generate",
            SiteCryptError::Derivation(_) => "derive",
            SiteCryptError::Encryption(_) => "encrypt",
            SiteCryptError::AuthenticationFailed | SiteCryptError::Decoding(_) => "decrypt",
            SiteCryptError::VerificationMismatch => "verify",
            SiteCryptError::TornArtifact(_)
            | SiteCryptError::ArtifactMissing(_)
            | SiteCryptError::Storage(_) => "store",
        }
    }
}

impl From<std::io::Error> for SiteCryptError {
    fn from(err: std::io::Error) -> Self {
        SiteCryptError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for SiteCryptError {
    fn from(err: serde_json::Error) -> Self {
        SiteCryptError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for SiteCryptError {
    fn from(err: serde_yaml::Error) -> Self {
        SiteCryptError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(SiteCryptError::MissingPassword.stage(), "precondition");
        assert_eq!(SiteCryptError::AuthenticationFailed.stage(), "decrypt");
        assert_eq!(SiteCryptError::VerificationMismatch.stage(), "verify");
        assert_eq!(
            SiteCryptError::Randomness("no entropy".to_string()).stage(),
            "generate"
        );
        assert_eq!(
            SiteCryptError::TornArtifact("digest".to_string()).stage(),
            "store"
        );
    }

    #[test]
    fn test_artifact_missing_message_includes_path() {
        let err = SiteCryptError::ArtifactMissing(PathBuf::from("out/profile.ctx"));
        assert!(err.to_string().contains("out/profile.ctx"));
    }
}
