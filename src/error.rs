//! Fatal error categories of a harness run.
//!
//! Cleanup failures are deliberately absent: they are reported through
//! [`crate::scratch::CleanupOutcome`] and never abort a run.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::config::MIN_LINES;

#[derive(Debug, Error)]
pub enum HarnessError {
    /// Requested corpus is too small to hold the header and the terminator.
    #[error("usage error: corpus size must be at least {min} lines, got {requested}", min = MIN_LINES)]
    InvalidLineCount { requested: u64 },

    /// An in-memory corpus of this size cannot be allocated.
    #[error("usage error: a {requested}-line corpus does not fit in memory; write it to a file instead")]
    CorpusTooLarge { requested: u64 },

    /// The scratch corpus could not be written.
    #[error("corpus write error: {}: {source}", .path.display())]
    CorpusWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The compiler executable is missing, not executable, or failed to spawn.
    #[error("launch error: {}: {source}", .path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The compiler did not exit within the configured timeout and was killed.
    #[error("timeout: {} did not finish within {}s", .path.display(), .after.as_secs_f64())]
    Timeout { path: PathBuf, after: Duration },
}

impl HarnessError {
    /// Short category label used in operator messages.
    pub fn category(&self) -> &'static str {
        match self {
            HarnessError::InvalidLineCount { .. } | HarnessError::CorpusTooLarge { .. } => "usage",
            HarnessError::CorpusWrite { .. } => "corpus-write",
            HarnessError::Launch { .. } => "launch",
            HarnessError::Timeout { .. } => "timeout",
        }
    }

    /// Process exit code the binary maps this error to.
    pub fn exit_code(&self) -> i32 {
        match self {
            HarnessError::InvalidLineCount { .. } | HarnessError::CorpusTooLarge { .. } => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
