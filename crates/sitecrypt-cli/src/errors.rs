//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use sitecrypt_core::SiteCryptError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, source document, artifact)
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong password, altered record)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// Artifact failed an integrity check
    IntegrityFailed(String),

    /// Anything else reported by the pipeline
    Failed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::InvalidInput(message)
            | CliError::IntegrityFailed(message)
            | CliError::Failed(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::IntegrityFailed(_) => exit_codes::INTEGRITY_FAILED,
            CliError::Failed(_) => exit_codes::GENERAL,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}

impl From<&SiteCryptError> for CliError {
    fn from(err: &SiteCryptError) -> Self {
        let message = format!("{} failed: {}", err.stage(), err);
        match err {
            SiteCryptError::MissingPassword => CliError::invalid_input(format!(
                "{}\nHint: pass the password as an argument or set {}.",
                message,
                crate::constants::PASSWORD_ENV
            )),
            SiteCryptError::InvalidInput(_) | SiteCryptError::Serialization(_) => {
                CliError::InvalidInput(message)
            }
            SiteCryptError::ArtifactMissing(_) => CliError::not_found(
                message,
                "Hint: run `sitecrypt build` first, or check --ciphertext/--record.",
            ),
            SiteCryptError::AuthenticationFailed => CliError::auth_failed_with_hint(
                message,
                "Hint: check the password. The record and ciphertext must come from the same build.",
            ),
            SiteCryptError::Decoding(_)
            | SiteCryptError::VerificationMismatch
            | SiteCryptError::TornArtifact(_) => CliError::IntegrityFailed(message),
            SiteCryptError::Randomness(_)
            | SiteCryptError::Derivation(_)
            | SiteCryptError::Encryption(_)
            | SiteCryptError::Storage(_) => CliError::Failed(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes_follow_core_errors() {
        let cases = [
            (SiteCryptError::MissingPassword, exit_codes::INVALID_INPUT),
            (
                SiteCryptError::ArtifactMissing(PathBuf::from("x.ctx")),
                exit_codes::NOT_FOUND,
            ),
            (SiteCryptError::AuthenticationFailed, exit_codes::AUTH_FAILED),
            (
                SiteCryptError::VerificationMismatch,
                exit_codes::INTEGRITY_FAILED,
            ),
            (
                SiteCryptError::TornArtifact("pair".to_string()),
                exit_codes::INTEGRITY_FAILED,
            ),
            (
                SiteCryptError::Storage("disk".to_string()),
                exit_codes::GENERAL,
            ),
            (
                SiteCryptError::Randomness("no entropy".to_string()),
                exit_codes::GENERAL,
            ),
        ];
        for (err, code) in cases {
            assert_eq!(CliError::from(&err).exit_code(), code, "{err}");
        }
    }

    #[test]
    fn test_message_names_failing_stage() {
        let err = CliError::from(&SiteCryptError::VerificationMismatch);
        assert!(err.to_string().starts_with("verify failed:"));

        let err = CliError::from(&SiteCryptError::Randomness("no entropy".to_string()));
        assert!(err.to_string().starts_with("generate failed:"));
    }
}
