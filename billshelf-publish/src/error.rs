//! Error types for billshelf-publish.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from selection and publishing.
#[derive(Debug, Error)]
pub enum PublishError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error (manifest documents).
    #[error("manifest JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The run picked zero bills. Publishing refuses to replace a
    /// previously-good tree with an empty one; callers map this to a
    /// distinct exit status.
    #[error("no bills were picked; refusing to touch the published tree")]
    NothingToPublish,
}

/// Convenience constructor for [`PublishError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PublishError {
    PublishError::Io {
        path: path.into(),
        source,
    }
}
