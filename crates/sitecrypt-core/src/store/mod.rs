//! Artifact persistence.
//!
//! A sealed artifact is the ciphertext plus the salt and IV needed to
//! re-derive the key and decrypt it. The two halves are only meaningful as a
//! pair, so every `ArtifactStore` writes them as one logical transaction.

mod files;
mod memory;
pub mod record;

pub use files::FileArtifactStore;
pub use memory::MemoryArtifactStore;
pub use record::ConfigRecord;

use crate::crypto::{Iv, Salt};
use crate::error::Result;

/// Ciphertext (with tag) and the parameters that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedArtifact {
    pub ciphertext: Vec<u8>,
    pub salt: Salt,
    pub iv: Iv,
}

/// Storage interface for sealed artifacts.
///
/// All implementations must ensure:
/// - `write` either replaces both halves or leaves a state `read` rejects
/// - `read` immediately after `write(a)` returns exactly `a`
pub trait ArtifactStore {
    /// Persist the ciphertext and its `{salt, iv}` record.
    fn write(&self, artifact: &SealedArtifact) -> Result<()>;

    /// Reload the ciphertext and its `{salt, iv}` record.
    ///
    /// # Errors
    ///
    /// - `ArtifactMissing` if either half is absent
    /// - `Decoding` if either half is malformed
    /// - `TornArtifact` if the halves do not belong together
    fn read(&self) -> Result<SealedArtifact>;

    /// Remove both halves. Used when a freshly written pair fails verification.
    fn discard(&self) -> Result<()>;
}

impl<S: ArtifactStore + ?Sized> ArtifactStore for &S {
    fn write(&self, artifact: &SealedArtifact) -> Result<()> {
        (**self).write(artifact)
    }

    fn read(&self) -> Result<SealedArtifact> {
        (**self).read()
    }

    fn discard(&self) -> Result<()> {
        (**self).discard()
    }
}
