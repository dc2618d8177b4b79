//! Source document loading and canonicalization.
//!
//! The pipeline treats plaintext as opaque bytes. This module produces those
//! bytes from a YAML or JSON source file with a pinned canonical form:
//! compact JSON, object keys sorted, UTF-8, no trailing newline.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Result, SiteCryptError};

/// Anything that can hand the pipeline its plaintext bytes.
pub trait PlaintextSource {
    /// Produce the plaintext. Called once per pipeline run.
    fn plaintext(&self) -> Result<Vec<u8>>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(SiteCryptError::Serialization(format!(
                "Unsupported document type: {} (expected .yaml, .yml or .json)",
                path.display()
            ))),
        }
    }
}

/// A structured document on disk.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    path: PathBuf,
    format: DocumentFormat,
}

impl DocumentFile {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = DocumentFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document into a JSON tree.
    pub fn load(&self) -> Result<Value> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            SiteCryptError::Serialization(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))
        })?;
        parse(&text, self.format)
    }
}

impl PlaintextSource for DocumentFile {
    fn plaintext(&self) -> Result<Vec<u8>> {
        canonicalize(&self.load()?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Plaintext that the caller already serialized.
#[derive(Debug, Clone)]
pub struct InlineDocument(pub Vec<u8>);

impl PlaintextSource for InlineDocument {
    fn plaintext(&self) -> Result<Vec<u8>> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        format!("inline ({} bytes)", self.0.len())
    }
}

/// Parse document text in the given format into a JSON tree.
///
/// YAML merge keys (`<<: *anchor`) are resolved before conversion. A source
/// with no content is rejected.
pub fn parse(text: &str, format: DocumentFormat) -> Result<Value> {
    let value = match format {
        DocumentFormat::Yaml => {
            let mut yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
            yaml.apply_merge()?;
            serde_json::to_value(yaml)?
        }
        DocumentFormat::Json => serde_json::from_str(text)?,
    };
    if value.is_null() {
        return Err(SiteCryptError::Serialization(
            "Source document is empty".to_string(),
        ));
    }
    Ok(value)
}

/// Serialize a JSON tree to its canonical byte form.
pub fn canonicalize(value: &Value) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}
