use async_trait::async_trait;

use crate::{
    application::{dto::file_dto::NewFileDTO, error::ApplicationError},
    domain::models::metadata::FileRecord,
};

#[async_trait]
pub trait FileRepository: Send + Sync {
    /// Persists a new record; the repository assigns the id.
    async fn insert(&self, file: NewFileDTO) -> Result<FileRecord, ApplicationError>;
    /// All records ordered by `uploaded_at` descending.
    async fn find_all_newest_first(&self) -> Result<Vec<FileRecord>, ApplicationError>;
    async fn find_by_storage_name(
        &self,
        storage_name: &str,
    ) -> Result<Option<FileRecord>, ApplicationError>;
    async fn delete(&self, file: &FileRecord) -> Result<(), ApplicationError>;
}
