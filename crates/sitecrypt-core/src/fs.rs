//! Filesystem utilities for staged, atomic writes.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Result, SiteCryptError};

/// A fully written and synced temp file waiting to be renamed into place.
///
/// Dropping a `StagedFile` without committing it removes the temp file.
#[derive(Debug)]
pub struct StagedFile {
    temp_path: PathBuf,
    destination: PathBuf,
    committed: bool,
}

impl StagedFile {
    /// Write `data` to a temp file next to `destination` and fsync it.
    ///
    /// Creates the destination's parent directory when missing.
    pub fn stage(destination: &Path, data: &[u8]) -> Result<Self> {
        let parent = match destination.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| {
            SiteCryptError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;

        let filename = destination
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                SiteCryptError::Storage(format!("Invalid filename: {}", destination.display()))
            })?;
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| SiteCryptError::Storage(format!("System time error: {}", e)))?
            .as_nanos();
        let temp_path = parent.join(format!(".{}.{}.{}.tmp", filename, std::process::id(), nanos));

        let staged = Self {
            temp_path,
            destination: destination.to_path_buf(),
            committed: false,
        };

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&staged.temp_path)
            .map_err(|e| SiteCryptError::Storage(format!("Temp file create failed: {}", e)))?;
        file.write_all(data)
            .map_err(|e| SiteCryptError::Storage(format!("Temp file write failed: {}", e)))?;
        file.sync_all()
            .map_err(|e| SiteCryptError::Storage(format!("Temp file sync failed: {}", e)))?;

        Ok(staged)
    }

    /// Path of the temp file.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Rename the temp file over the destination.
    pub fn commit(mut self) -> Result<()> {
        rename_with_fallback(&self.temp_path, &self.destination).map_err(|e| {
            SiteCryptError::Storage(format!(
                "Failed to move {} into place: {}",
                self.destination.display(),
                e
            ))
        })?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

/// Write `data` to `destination` via a synced temp file and an atomic rename.
pub fn write_atomic(destination: &Path, data: &[u8]) -> Result<()> {
    StagedFile::stage(destination, data)?.commit()
}

/// Atomically rename a file, with fallback for platforms where rename fails if target exists.
///
/// On some platforms (notably Windows), `fs::rename` fails if the destination already exists.
/// This function handles that case by removing the destination first and retrying.
///
/// If the rename ultimately fails, the temp file is cleaned up.
///
/// # Errors
///
/// Returns an error if the rename fails even after the fallback attempt.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!(
                    "Atomic rename failed (initial: {}, retry: {})",
                    initial_err, retry_err
                ),
            )
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_atomic_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("nested").join("out.ctx");

        write_atomic(&dest, b"cafe").unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "cafe");
    }

    #[test]
    fn test_write_atomic_overwrites_existing() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("out.ctx");
        fs::write(&dest, "old").unwrap();

        write_atomic(&dest, b"new").unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
    }

    #[test]
    fn test_dropped_stage_leaves_destination_untouched() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("out.json");
        fs::write(&dest, "previous").unwrap();

        let staged = StagedFile::stage(&dest, b"next").unwrap();
        let temp = staged.temp_path().to_path_buf();
        assert!(temp.exists());
        drop(staged);

        assert!(!temp.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "previous");
    }

    #[test]
    fn test_rename_new_file() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("temp.txt");
        let dest = dir.path().join("dest.txt");
        fs::write(&temp, "test").unwrap();

        rename_with_fallback(&temp, &dest).unwrap();

        assert!(!temp.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "test");
    }
}
