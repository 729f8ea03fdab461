//! Ownership of the scratch corpus file.
//!
//! [`ScratchFile`] is created by writing a corpus to disk and is consumed by
//! [`ScratchFile::remove`], which reports what happened as a
//! [`CleanupOutcome`] instead of failing. If the owner is dropped without
//! being removed or kept (an early return, a panic unwinding through the
//! harness) the file is still deleted, silently.

use std::fmt;
use std::fs;
use std::io;
use std::mem;
use std::path::{Path, PathBuf};

use crate::config::{HEADER_COMMENT, TERMINATOR};
use crate::corpus::{create_corpus_file, write_lines};
use crate::error::{HarnessError, Result};

/// Result of one deletion attempt. Never escalates to a run failure.
#[derive(Debug)]
pub enum CleanupOutcome {
    Deleted,
    NotFound,
    PermissionDenied(io::Error),
    Other(io::Error),
}

impl CleanupOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, CleanupOutcome::Deleted)
    }

    /// Classify the result of `fs::remove_file`.
    pub fn from_io(result: io::Result<()>) -> Self {
        match result {
            Ok(()) => CleanupOutcome::Deleted,
            Err(e) => match e.kind() {
                io::ErrorKind::NotFound => CleanupOutcome::NotFound,
                io::ErrorKind::PermissionDenied => CleanupOutcome::PermissionDenied(e),
                _ => CleanupOutcome::Other(e),
            },
        }
    }

    /// Operator-facing warning for `path`, or `None` when the file was deleted.
    pub fn warning(&self, path: &Path) -> Option<String> {
        match self {
            CleanupOutcome::Deleted => None,
            CleanupOutcome::NotFound => Some(format!(
                "cleanup warning: file not found deleting stress test file {}",
                path.display()
            )),
            CleanupOutcome::PermissionDenied(e) => Some(format!(
                "cleanup warning: permission denied deleting stress test file {}: {}",
                path.display(),
                e
            )),
            CleanupOutcome::Other(e) => Some(format!(
                "cleanup warning: other error deleting stress test file {}: {}",
                path.display(),
                e
            )),
        }
    }
}

impl fmt::Display for CleanupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanupOutcome::Deleted => f.write_str("deleted"),
            CleanupOutcome::NotFound => f.write_str("not found"),
            CleanupOutcome::PermissionDenied(_) => f.write_str("permission denied"),
            CleanupOutcome::Other(_) => f.write_str("other error"),
        }
    }
}

/// Attempt to delete `path` and classify the result.
///
/// Safe to call repeatedly: a second call on the same path reports
/// [`CleanupOutcome::NotFound`].
pub fn remove_scratch_file(path: &Path) -> CleanupOutcome {
    CleanupOutcome::from_io(fs::remove_file(path))
}

/// Exclusive owner of one on-disk corpus for the duration of a run.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
    armed: bool,
}

impl ScratchFile {
    /// Write a corpus with the given `body` to `path` and take ownership of
    /// the file.
    ///
    /// `body` is streamed, so it may be a [`crate::corpus::Corpus`] reference
    /// or lines straight from [`crate::synth::Synthesizer::lines`]. If `path`
    /// cannot be opened, nothing on disk is touched. If writing fails after
    /// the file was opened, the partial file is removed before the
    /// [`HarnessError::CorpusWrite`] is returned.
    pub fn create<I>(path: impl Into<PathBuf>, body: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let path = path.into();
        let out = match create_corpus_file(&path) {
            Ok(out) => out,
            Err(source) => return Err(HarnessError::CorpusWrite { path, source }),
        };

        // From here on the file is ours; dropping `scratch` deletes it.
        let scratch = ScratchFile { path, armed: true };
        match write_lines(out, HEADER_COMMENT, body, TERMINATOR) {
            Ok(()) => Ok(scratch),
            Err(source) => Err(HarnessError::CorpusWrite {
                path: scratch.path.clone(),
                source,
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file now and report the outcome.
    pub fn remove(mut self) -> CleanupOutcome {
        self.armed = false;
        remove_scratch_file(&self.path)
    }

    /// Release ownership without deleting; the file stays on disk.
    pub fn keep(mut self) -> PathBuf {
        self.armed = false;
        mem::take(&mut self.path)
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if self.armed {
            let _ = fs::remove_file(&self.path);
        }
    }
}
