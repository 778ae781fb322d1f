#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::Path;

use anyhow::{Context, Result};

use crate::error::IntakeError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A named binary blob as handed over by the shell, before any expansion
pub struct Upload {
    /// name the user uploaded the blob under
    name:  String,
    /// raw bytes of the blob
    bytes: Vec<u8>,
}

impl Upload {
    /// Creates a new upload
    ///
    /// * `name`: file name the blob was uploaded under
    /// * `bytes`: raw contents
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name:  name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk as an upload named after its final path
    /// component.
    pub fn read(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .with_context(|| format!("{} does not name a file", path.display()))?;
        let bytes =
            std::fs::read(path).with_context(|| format!("Could not read {}", path.display()))?;

        Ok(Self { name, bytes })
    }

    /// Name the blob was uploaded under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw contents of the blob.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One named piece of Java source text entering the pipeline
pub struct SourceUnit {
    /// path-like identifier, unique within a submission
    name:    String,
    /// raw source text
    content: String,
}

impl SourceUnit {
    /// Creates a source unit, rejecting empty names.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Result<Self, IntakeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(IntakeError::EmptyName);
        }

        Ok(Self {
            name,
            content: content.into(),
        })
    }

    /// Decodes `bytes` as UTF-8, dropping invalid sequences, and wraps the
    /// result in a unit named `name`.
    pub fn decode(name: impl Into<String>, bytes: &[u8]) -> Result<Self, IntakeError> {
        let name = name.into();
        let (content, dropped) = decode_lossy(bytes);
        if dropped > 0 {
            tracing::warn!("{name}: dropped {dropped} byte(s) that were not valid UTF-8");
        }
        Self::new(name, content)
    }

    /// Identifier of this unit.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source text of this unit.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Decodes as much UTF-8 as possible, skipping invalid byte sequences.
/// Returns the text and the number of bytes that were skipped.
pub fn decode_lossy(bytes: &[u8]) -> (String, usize) {
    let mut text = String::with_capacity(bytes.len());
    let mut dropped = 0;

    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        dropped += chunk.invalid().len();
    }

    (text, dropped)
}
