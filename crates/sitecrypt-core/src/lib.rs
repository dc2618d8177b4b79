//! # sitecrypt core
//!
//! Password-based sealing of a structured document into an encrypted artifact
//! that can be shipped inside a public static site, plus the verification
//! round trip that proves the artifact decrypts before the build is trusted.
//!
//! ## Architecture
//!
//! - **crypto**: PBKDF2 key derivation, AES-256-GCM, salt/iv, password policy
//! - **store**: Artifact persistence (ciphertext + `{salt, iv}` record)
//! - **document**: Source loading and canonical serialization
//! - **pipeline**: Seal → persist → reload → verify orchestration
//! - **fs**: Staged atomic file writes

pub mod crypto;
pub mod document;
pub mod error;
pub mod fs;
pub mod pipeline;
pub mod store;

pub use document::{DocumentFile, PlaintextSource};
pub use error::{Result, SiteCryptError};
pub use pipeline::{BuildReport, Pipeline, Stage, StageObserver};
pub use store::{ArtifactStore, FileArtifactStore, SealedArtifact};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
