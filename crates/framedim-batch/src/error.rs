//! Error types for batch runs.

use std::path::PathBuf;

/// Failures that abort a batch. Per-structure failures never surface here;
/// they become result rows.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to read identifier list {}: {source}", path.display())]
    ReadIdentifiers {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write results to {target}: {source}")]
    Write {
        target: String,
        #[source]
        source: std::io::Error,
    },
}
