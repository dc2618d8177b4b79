//! Two-file artifact store with a staged commit.
//!
//! Output 1 is the hex ciphertext, output 2 the JSON config record. Both are
//! staged as synced temp files before either is renamed into place, and the
//! record is renamed last. The record carries a digest of the ciphertext file,
//! so a crash between the two renames leaves a pair that `read` rejects.

use std::fs;
use std::path::{Path, PathBuf};

use super::record::ConfigRecord;
use super::{ArtifactStore, SealedArtifact};
use crate::error::{Result, SiteCryptError};
use crate::fs::StagedFile;

/// Filesystem-backed artifact store.
#[derive(Debug, Clone)]
pub struct FileArtifactStore {
    ciphertext_path: PathBuf,
    record_path: PathBuf,
}

impl FileArtifactStore {
    pub fn new(ciphertext_path: impl Into<PathBuf>, record_path: impl Into<PathBuf>) -> Self {
        Self {
            ciphertext_path: ciphertext_path.into(),
            record_path: record_path.into(),
        }
    }

    pub fn ciphertext_path(&self) -> &Path {
        &self.ciphertext_path
    }

    pub fn record_path(&self) -> &Path {
        &self.record_path
    }

    fn read_text(path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(SiteCryptError::ArtifactMissing(path.to_path_buf()));
        }
        fs::read_to_string(path).map_err(|e| {
            SiteCryptError::Storage(format!("Failed to read {}: {}", path.display(), e))
        })
    }
}

impl ArtifactStore for FileArtifactStore {
    fn write(&self, artifact: &SealedArtifact) -> Result<()> {
        if self.ciphertext_path == self.record_path {
            return Err(SiteCryptError::InvalidInput(
                "Ciphertext and record must be written to different files".to_string(),
            ));
        }

        let ciphertext_text = hex::encode(&artifact.ciphertext);
        let record = ConfigRecord::new(&artifact.salt, &artifact.iv, &ciphertext_text);
        let record_json = record.to_json()?;

        let staged_ciphertext = StagedFile::stage(&self.ciphertext_path, ciphertext_text.as_bytes())?;
        let staged_record = StagedFile::stage(&self.record_path, record_json.as_bytes())?;

        staged_ciphertext.commit()?;
        staged_record.commit()?;

        tracing::debug!(
            ciphertext = %self.ciphertext_path.display(),
            record = %self.record_path.display(),
            bytes = artifact.ciphertext.len(),
            "artifact pair committed"
        );
        Ok(())
    }

    fn read(&self) -> Result<SealedArtifact> {
        let ciphertext_text = Self::read_text(&self.ciphertext_path)?;
        let record_text = Self::read_text(&self.record_path)?;

        let ciphertext_text = ciphertext_text.trim();
        let record = ConfigRecord::parse(&record_text)?;
        if !record.matches(ciphertext_text) {
            return Err(SiteCryptError::TornArtifact(format!(
                "{} was not written together with {}",
                self.record_path.display(),
                self.ciphertext_path.display()
            )));
        }

        let ciphertext = hex::decode(ciphertext_text).map_err(|e| {
            SiteCryptError::Decoding(format!(
                "{} is not valid hex: {}",
                self.ciphertext_path.display(),
                e
            ))
        })?;

        Ok(SealedArtifact {
            ciphertext,
            salt: record.salt()?,
            iv: record.iv()?,
        })
    }

    fn discard(&self) -> Result<()> {
        // Record first: without it the ciphertext alone is never accepted.
        for path in [&self.record_path, &self.ciphertext_path] {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(SiteCryptError::Storage(format!(
                        "Failed to remove {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }
        Ok(())
    }
}
