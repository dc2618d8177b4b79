//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, used by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Unexpected failure (I/O, randomness, cipher setup).
    pub const GENERAL: i32 = 1;

    /// Resource not found (config, source document, artifact).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input, missing password, unreadable source document.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong password, or salt/iv/ciphertext altered).
    pub const AUTH_FAILED: i32 = 5;

    /// Integrity check failed (verification mismatch, torn or malformed artifact).
    pub const INTEGRITY_FAILED: i32 = 6;
}

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "sitecrypt.toml";

/// Default source document.
pub const DEFAULT_INPUT_PATH: &str = "_build/src/data/profile.yaml";

/// Default ciphertext output, consumed by the page template.
pub const DEFAULT_CIPHERTEXT_PATH: &str = "_includes/hb-context/profile.ctx";

/// Default `{salt, iv}` record output.
pub const DEFAULT_RECORD_PATH: &str = "_data/hbcfg/profile.json";

/// Environment variable holding the build password.
pub const PASSWORD_ENV: &str = "SITECRYPT_PASSWORD";
