use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Invalid blob key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for ApplicationError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound(key) => ApplicationError::NotFound(key),
            StorageError::InvalidKey(key) => ApplicationError::NotFound(key),
            StorageError::Io(e) => ApplicationError::Io(e.to_string()),
        }
    }
}
