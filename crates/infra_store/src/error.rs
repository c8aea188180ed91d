//! Storage error types

use std::path::PathBuf;

use thiserror::Error;

use core_kernel::PortError;

/// Errors raised by the local stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// Key contains characters that cannot name a file
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Filesystem operation failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored value is not valid UTF-8
    #[error("Value under {0:?} is not valid UTF-8")]
    Encoding(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<StoreError> for PortError {
    fn from(err: StoreError) -> Self {
        PortError::Storage {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
