//! Error types for billshelf-descriptor.
//!
//! XML and archive failures inside the source search are not errors at this
//! boundary — a candidate source that fails to parse is logged and skipped,
//! and the search moves to the next location.

use std::path::PathBuf;

use thiserror::Error;

use billshelf_core::DescriptorError;

/// All errors that can arise from descriptor synthesis.
#[derive(Debug, Error)]
pub enum SynthError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error persisting the synthesized descriptor.
    #[error("descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),
}

/// Convenience constructor for [`SynthError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SynthError {
    SynthError::Io {
        path: path.into(),
        source,
    }
}
