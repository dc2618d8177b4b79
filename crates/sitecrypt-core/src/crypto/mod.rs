//! Cryptographic operations for sitecrypt.
//!
//! Fixed parameter set, used on every path:
//! - **PBKDF2-HMAC-SHA256**, 100 000 iterations, 16-byte salt
//! - **AES-256-GCM**, 32-byte key, 12-byte IV, 16-byte tag appended
//!
//! ## Security Model
//!
//! - The password is never persisted or logged
//! - The derived key only lives in memory and is zeroized on drop
//! - Salt and IV are regenerated on every build
//!
//! ## Threat Model
//!
//! We defend against:
//! - Readers of the published static asset without the password
//! - Tampering with the published ciphertext or its record
//!
//! We do NOT defend against:
//! - Weak passwords beyond the minimum-length check
//! - A compromised build machine

pub mod cipher;
pub mod kdf;
pub mod material;
pub mod password;

pub use cipher::{decrypt, encrypt, TAG_LENGTH};
pub use kdf::{derive_key, DerivedKey, KEY_LENGTH, PBKDF2_ITERATIONS};
pub use material::{Iv, Salt, IV_LENGTH, SALT_LENGTH};
pub use password::{require_password, validate_password, MIN_PASSWORD_LENGTH};
