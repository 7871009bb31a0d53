//! Error types for billshelf-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from descriptor persistence.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parse error on load — includes file path and position context
    /// from serde_json.
    #[error("failed to parse descriptor at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error (save path).
    #[error("descriptor JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience constructor for [`DescriptorError::Io`].
pub fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> DescriptorError {
    DescriptorError::Io {
        path: path.into(),
        source,
    }
}
