use std::path::PathBuf;

/// Errors from collection configuration.
///
/// Data operations on a collection never fail; only loading a
/// [`StoreConfig`](crate::StoreConfig) can.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML for [`StoreConfig`](crate::StoreConfig).
    #[error("invalid store config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result alias for store configuration.
pub type StoreResult<T> = Result<T, StoreError>;
