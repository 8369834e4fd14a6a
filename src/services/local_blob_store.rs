use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    application::{error::ApplicationError, services::BlobStore},
    services::error::StorageError,
};

/// Blob store over a single local directory. A blob lives at `{root}/{key}`.
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Keys are single path components. Anything that could escape the root or collide with
    /// an in-flight temp file (leading dot) is refused.
    fn checked_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.starts_with('.') || key.contains(['/', '\\', '\0']) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }

    async fn write_atomically(&self, key: &str, content: &[u8]) -> Result<u64, StorageError> {
        let target = self.checked_path(key)?;
        let temp = self.root.join(format!(".{}.{}.tmp", key, Uuid::new_v4()));

        let result = async {
            let mut file = fs::File::create(&temp).await?;
            file.write_all(content).await?;
            file.sync_all().await?;
            drop(file);
            fs::rename(&temp, &target).await?;
            Ok::<_, std::io::Error>(())
        }
        .await;

        if let Err(e) = result {
            if let Err(cleanup) = fs::remove_file(&temp).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!("Could not remove temp file {:?}: {}", temp, cleanup);
                }
            }
            return Err(StorageError::Io(e));
        }

        let stored = fs::metadata(&target).await?.len();
        debug!("Wrote {} bytes to {:?}", stored, target);
        Ok(stored)
    }

    async fn read_blob(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.checked_path(key)?;
        fs::read(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::NotFound(key.to_string())
            } else {
                StorageError::Io(e)
            }
        })
    }

    async fn delete_blob(&self, key: &str) -> Result<(), StorageError> {
        let path = match self.checked_path(key) {
            Ok(path) => path,
            // Nothing can live under an invalid key, so there is nothing to delete.
            Err(_) => return Ok(()),
        };
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted {:?}", path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn init(&self) -> Result<(), ApplicationError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }

    fn location(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    async fn write(&self, key: &str, content: &[u8]) -> Result<u64, ApplicationError> {
        self.write_atomically(key, content)
            .await
            .map_err(|e| match e {
                // A bad key on write is a fault of whoever minted it, not a missing blob.
                StorageError::InvalidKey(key) => {
                    ApplicationError::Io(format!("refusing to write blob under key '{}'", key))
                }
                other => other.into(),
            })
    }

    async fn read(&self, key: &str) -> Result<Vec<u8>, ApplicationError> {
        Ok(self.read_blob(key).await?)
    }

    async fn delete(&self, key: &str) -> Result<(), ApplicationError> {
        Ok(self.delete_blob(key).await?)
    }
}
