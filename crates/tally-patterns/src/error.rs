//! Error types for pattern dataset loading.

use thiserror::Error;

/// Errors surfaced while resolving a pattern dataset.
///
/// These are configuration errors: the operator that asked for the dataset
/// fails to initialize and nothing is retried.
#[derive(Debug, Error)]
pub enum PatternError {
    /// No dataset map has been installed in the provider.
    #[error("data map is not set")]
    DataMapUnset,

    /// The named dataset does not exist.
    #[error("the data '{name}' is not found")]
    NotFound { name: String },

    /// A file-backed dataset could not be read.
    #[error("failed to open file: {name}. {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A remote dataset could not be downloaded.
    #[error("failed to download {name}: {reason}")]
    Download { name: String, reason: String },
}

/// Convenience type alias for pattern loading.
pub type Result<T> = std::result::Result<T, PatternError>;
