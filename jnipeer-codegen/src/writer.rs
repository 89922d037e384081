//! Change-detecting artifact writer.
//!
//! Artifacts are rewritten only when forced, absent, or different from what
//! is already on disk, so unchanged models leave file timestamps alone.

use crate::error::CodegenError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// What the writer did with one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteOutcome {
    /// Existing content was identical; nothing written.
    Unchanged,
    /// Target did not exist.
    Created,
    /// Existing content differed.
    Overwritten,
    /// Written regardless of existing content.
    ForcedOverwrite,
}

impl WriteOutcome {
    /// Returns true if the artifact was written.
    #[must_use]
    pub const fn was_written(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    /// Returns the diagnostic text for this outcome.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Unchanged => "No need to update file",
            Self::Created => "Creating file",
            Self::Overwritten => "Overwriting file",
            Self::ForcedOverwrite => "Forcefully writing file",
        }
    }
}

/// Writes artifacts whose content changed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactWriter {
    force: bool,
    verbose: bool,
}

impl ArtifactWriter {
    /// Creates a new writer.
    #[must_use]
    pub const fn new(force: bool, verbose: bool) -> Self {
        Self { force, verbose }
    }

    /// Writes `content` to `path` if required.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` carrying `path` if the existing file cannot
    /// be inspected or the new content cannot be written.
    pub fn write(&self, path: &Path, content: &[u8]) -> Result<WriteOutcome, CodegenError> {
        let outcome = self.decide(path, content)?;

        if self.verbose {
            tracing::info!("[{} {}]", outcome.describe(), path.display());
        } else {
            tracing::debug!(path = %path.display(), ?outcome, "artifact checked");
        }

        if outcome.was_written() {
            fs::write(path, content).map_err(|e| CodegenError::io(path, e))?;
        }
        Ok(outcome)
    }

    fn decide(&self, path: &Path, content: &[u8]) -> Result<WriteOutcome, CodegenError> {
        if self.force {
            return Ok(WriteOutcome::ForcedOverwrite);
        }

        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(WriteOutcome::Created),
            Err(e) => return Err(CodegenError::io(path, e)),
        };

        if metadata.len() != content.len() as u64 {
            return Ok(WriteOutcome::Overwritten);
        }

        let existing = fs::read(path).map_err(|e| CodegenError::io(path, e))?;
        if existing == content {
            Ok(WriteOutcome::Unchanged)
        } else {
            Ok(WriteOutcome::Overwritten)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_then_unchanged() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("CarManagedPeer.h");
        let writer = ArtifactWriter::new(false, false);

        let first = writer.write(&path, b"#pragma once\n").expect("Failed to write");
        assert_eq!(first, WriteOutcome::Created);
        let second = writer.write(&path, b"#pragma once\n").expect("Failed to write");
        assert_eq!(second, WriteOutcome::Unchanged);
        assert!(!second.was_written());
    }

    #[test]
    fn test_overwrite_on_length_and_content_change() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("peer.cpp");
        let writer = ArtifactWriter::new(false, true);

        writer.write(&path, b"abc").expect("Failed to write");
        assert_eq!(
            writer.write(&path, b"abcd").expect("Failed to write"),
            WriteOutcome::Overwritten
        );
        assert_eq!(
            writer.write(&path, b"abce").expect("Failed to write"),
            WriteOutcome::Overwritten
        );
        assert_eq!(fs::read(&path).expect("Failed to read"), b"abce");
    }

    #[test]
    fn test_force_always_writes() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("peer.h");
        let writer = ArtifactWriter::new(true, false);

        assert_eq!(
            writer.write(&path, b"x").expect("Failed to write"),
            WriteOutcome::ForcedOverwrite
        );
        assert_eq!(
            writer.write(&path, b"x").expect("Failed to write"),
            WriteOutcome::ForcedOverwrite
        );
    }

    #[test]
    fn test_io_error_carries_path() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("missing").join("peer.h");
        let err = ArtifactWriter::new(false, false).write(&path, b"x").unwrap_err();
        match err {
            CodegenError::Io { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
