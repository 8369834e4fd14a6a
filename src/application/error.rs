use thiserror::Error;

use crate::application::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O failure: {0}")]
    Io(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApplicationError {
    /// Storage-layer faults: the blob store or the metadata store failed underneath us.
    pub fn is_io_failure(&self) -> bool {
        matches!(self, ApplicationError::Io(_) | ApplicationError::Database(_))
    }
}
