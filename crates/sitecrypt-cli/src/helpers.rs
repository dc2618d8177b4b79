//! Password input.

use std::io::{self, IsTerminal};

use dialoguer::Password;
use secrecy::SecretString;
use sitecrypt_core::crypto::validate_password;
use sitecrypt_core::SiteCryptError;

use crate::cli::PasswordArgs;

/// Resolve the password from the argument or `SITECRYPT_PASSWORD`, falling
/// back to a prompt on a TTY.
///
/// `confirm` asks twice and re-prompts until the password meets the sealing
/// policy; it is set for `build`. Runs before any file is touched so a
/// missing password never leaves partial output.
pub fn resolve_password(args: &PasswordArgs, confirm: bool) -> anyhow::Result<SecretString> {
    // clap has already folded SITECRYPT_PASSWORD into `args.password`.
    if let Some(value) = args.password.as_ref() {
        if !value.trim().is_empty() {
            return Ok(SecretString::from(value.clone()));
        }
    }

    if args.no_input || !io::stdin().is_terminal() {
        return Err(SiteCryptError::MissingPassword.into());
    }

    if !confirm {
        let value = Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?;
        return Ok(SecretString::from(value));
    }

    loop {
        let value = Password::new()
            .with_prompt("Enter password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?;
        let secret = SecretString::from(value);
        if let Err(err) = validate_password(&secret) {
            eprintln!("Password does not meet requirements: {}", err);
            continue;
        }
        return Ok(secret);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_argument_wins() {
        let args = PasswordArgs {
            password: Some("hunter2hunter2".to_string()),
            no_input: true,
        };
        let secret = resolve_password(&args, true).unwrap();
        assert_eq!(secret.expose_secret(), "hunter2hunter2");
    }

    #[test]
    fn test_blank_without_input_is_missing_password() {
        let args = PasswordArgs {
            password: Some("   ".to_string()),
            no_input: true,
        };
        let err = resolve_password(&args, false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SiteCryptError>(),
            Some(SiteCryptError::MissingPassword)
        ));
    }
}
