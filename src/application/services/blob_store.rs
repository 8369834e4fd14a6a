use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::error::ApplicationError;

/// Byte-addressable storage keyed by storage name.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Creates the root location. Called once at startup; failure is fatal.
    async fn init(&self) -> Result<(), ApplicationError>;

    /// Location of `key`. Pure: the same key always maps to the same place.
    fn location(&self, key: &str) -> PathBuf;

    /// Writes `content` under `key`, atomically replacing anything already there.
    /// Returns the stored size in bytes.
    async fn write(&self, key: &str, content: &[u8]) -> Result<u64, ApplicationError>;

    async fn read(&self, key: &str) -> Result<Vec<u8>, ApplicationError>;

    /// Removing a missing blob is not an error.
    async fn delete(&self, key: &str) -> Result<(), ApplicationError>;
}
