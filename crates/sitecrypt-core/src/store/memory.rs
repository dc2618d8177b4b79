//! In-process artifact store.

use std::sync::Mutex;

use super::{ArtifactStore, SealedArtifact};
use crate::error::{Result, SiteCryptError};

/// Holds the last written artifact in memory. Useful for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    slot: Mutex<Option<SealedArtifact>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored artifact without going through `write`.
    pub fn replace(&self, artifact: SealedArtifact) -> Result<()> {
        *self.lock()? = Some(artifact);
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<SealedArtifact>>> {
        self.slot
            .lock()
            .map_err(|_| SiteCryptError::Storage("Artifact slot poisoned".to_string()))
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn write(&self, artifact: &SealedArtifact) -> Result<()> {
        self.replace(artifact.clone())
    }

    fn read(&self) -> Result<SealedArtifact> {
        self.lock()?
            .clone()
            .ok_or_else(|| SiteCryptError::Storage("No artifact has been written".to_string()))
    }

    fn discard(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}
