use std::sync::{
    atomic::{AtomicI64, Ordering},
    RwLock,
};

use async_trait::async_trait;

use crate::{
    application::{
        dto::file_dto::NewFileDTO, error::ApplicationError,
        repositories::file_repository::FileRepository,
    },
    domain::models::metadata::FileRecord,
};

/// Process-local metadata store. Used when no database is configured, and in tests.
pub struct InMemoryFileRepository {
    records: RwLock<Vec<FileRecord>>,
    next_id: AtomicI64,
}

impl InMemoryFileRepository {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryFileRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> ApplicationError {
    ApplicationError::Database("in-memory file store lock poisoned".to_string())
}

#[async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn insert(&self, file: NewFileDTO) -> Result<FileRecord, ApplicationError> {
        let mut records = self.records.write().map_err(poisoned)?;

        if records.iter().any(|r| r.storage_name == file.storage_name) {
            return Err(ApplicationError::Database(format!(
                "duplicate storage name: {}",
                file.storage_name
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = file.into_record(id);
        records.push(record.clone());
        Ok(record)
    }

    async fn find_all_newest_first(&self) -> Result<Vec<FileRecord>, ApplicationError> {
        let mut records = self.records.read().map_err(poisoned)?.clone();
        records.sort_by(|a, b| {
            b.uploaded_at
                .cmp(&a.uploaded_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }

    async fn find_by_storage_name(
        &self,
        storage_name: &str,
    ) -> Result<Option<FileRecord>, ApplicationError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records
            .iter()
            .find(|r| r.storage_name == storage_name)
            .cloned())
    }

    async fn delete(&self, file: &FileRecord) -> Result<(), ApplicationError> {
        let mut records = self.records.write().map_err(poisoned)?;
        let before = records.len();
        records.retain(|r| r.id != file.id);

        if records.len() == before {
            return Err(ApplicationError::NotFound(file.storage_name.clone()));
        }
        Ok(())
    }
}
