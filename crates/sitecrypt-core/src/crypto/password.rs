//! Password validation.
//!
//! Enforces minimum requirements on the build password.

use secrecy::{ExposeSecret, SecretString};

use crate::error::{Result, SiteCryptError};

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Check that a password was supplied at all.
///
/// Empty or whitespace-only values count as missing.
pub fn require_password(password: &SecretString) -> Result<()> {
    if password.expose_secret().trim().is_empty() {
        return Err(SiteCryptError::MissingPassword);
    }
    Ok(())
}

/// Validate a password used to seal a new artifact.
///
/// # Requirements
///
/// - Present (see [`require_password`])
/// - At least 8 characters long
///
/// # Examples
///
/// ```
/// use secrecy::SecretString;
/// use sitecrypt_core::crypto::validate_password;
///
/// assert!(validate_password(&SecretString::from("correct-horse-battery".to_string())).is_ok());
/// assert!(validate_password(&SecretString::from("short".to_string())).is_err());
/// ```
pub fn validate_password(password: &SecretString) -> Result<()> {
    require_password(password)?;

    let length = password.expose_secret().chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err(SiteCryptError::InvalidInput(format!(
            "Password must be at least {} characters (got {})",
            MIN_PASSWORD_LENGTH, length
        )));
    }

    Ok(())
}
