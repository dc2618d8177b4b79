pub mod build;
pub mod decrypt;
pub mod misc;
pub mod verify;

use std::path::Path;

use sitecrypt_core::DocumentFile;

use crate::errors::CliError;

/// Open the source document, reporting a missing file as not found.
pub(crate) fn open_document(path: &Path) -> anyhow::Result<DocumentFile> {
    if !path.exists() {
        return Err(CliError::not_found(
            format!("Source document not found: {}", path.display()),
            "Hint: pass --input or set [paths] input in sitecrypt.toml.",
        )
        .into());
    }
    Ok(DocumentFile::open(path)?)
}
