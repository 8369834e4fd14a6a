use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::{
    application::{
        dto::file_dto::NewFileDTO,
        error::ApplicationError,
        naming::generate_storage_name,
        repositories::file_repository::FileRepository,
        services::BlobStore,
        validation::{validate_upload, ValidationError},
    },
    domain::models::{file::FileData, metadata::FileRecord},
};

#[derive(Debug, Clone, PartialEq)]
pub struct FileDownload {
    pub content: Vec<u8>,
    pub original_name: String,
}

/// Coordinates the blob store and the metadata repository.
///
/// Upload writes the blob first and the record second; delete removes the blob first and the
/// record second. Neither is rolled back on a later failure, so a crash or error between the two
/// steps can leave an orphaned blob (upload) or an orphaned record (delete). Orphans are logged,
/// never repaired here.
#[derive(Clone)]
pub struct FileService {
    repository: Arc<dyn FileRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl FileService {
    pub fn new(repository: Arc<dyn FileRepository>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { repository, blobs }
    }

    pub async fn upload(&self, file_data: FileData) -> Result<FileRecord, ApplicationError> {
        validate_upload(
            file_data.content.len(),
            file_data.filename.as_deref(),
            file_data.declared_size,
        )?;

        let content_type = file_data.content_type_or_default();
        let original_name = file_data.filename.ok_or(ValidationError::MissingName)?;
        let storage_name = generate_storage_name(&original_name);

        let size_bytes = self.blobs.write(&storage_name, &file_data.content).await?;
        let storage_path = self.blobs.location(&storage_name).to_string_lossy().into_owned();

        let now = Utc::now();
        let new_file = NewFileDTO {
            storage_name: storage_name.clone(),
            original_name,
            size_bytes,
            content_type,
            uploaded_at: now,
            last_modified_at: now,
            storage_path,
        };

        let record = self.repository.insert(new_file).await.map_err(|e| {
            error!(
                "Metadata insert failed, blob {} left without a record: {}",
                storage_name, e
            );
            e
        })?;

        info!(
            "Stored {} ({} bytes) as {}",
            record.original_name, record.size_bytes, record.storage_name
        );
        Ok(record)
    }

    pub async fn list_files(&self) -> Result<Vec<FileRecord>, ApplicationError> {
        self.repository.find_all_newest_first().await
    }

    pub async fn download(&self, storage_name: &str) -> Result<FileDownload, ApplicationError> {
        let record = self.find_record(storage_name).await?;

        let location = self.blobs.location(&record.storage_name);
        if location.to_string_lossy() != record.storage_path {
            warn!(
                "Recorded path {} for {} differs from current location {}",
                record.storage_path,
                record.storage_name,
                location.display()
            );
        }

        let content = self.blobs.read(&record.storage_name).await?;

        Ok(FileDownload {
            content,
            original_name: record.original_name,
        })
    }

    pub async fn delete(&self, storage_name: &str) -> Result<(), ApplicationError> {
        let record = self.find_record(storage_name).await?;

        if let Err(e) = self.blobs.delete(&record.storage_name).await {
            error!(
                "Could not remove blob {}, keeping its record: {}",
                record.storage_name, e
            );
            return Err(e);
        }

        self.repository.delete(&record).await.map_err(|e| {
            error!(
                "Blob {} removed but its record could not be deleted: {}",
                record.storage_name, e
            );
            e
        })?;

        info!("Deleted {}", record.storage_name);
        Ok(())
    }

    async fn find_record(&self, storage_name: &str) -> Result<FileRecord, ApplicationError> {
        self.repository
            .find_by_storage_name(storage_name)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(storage_name.to_string()))
    }
}
