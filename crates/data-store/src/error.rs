use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or saving goal tracker data.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A data file could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data file did not contain the expected JSON document.
    #[error("Serialization error in {}: {source}", path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
