use async_trait::async_trait;
use sqlx::query_as;

use crate::{
    application::{
        dto::file_dto::NewFileDTO, error::ApplicationError,
        repositories::file_repository::FileRepository,
    },
    domain::models::metadata::FileRecord,
};

pub struct PgFileRepository {
    pool: sqlx::PgPool,
}

impl PgFileRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn insert(&self, file: NewFileDTO) -> Result<FileRecord, ApplicationError> {
        let mut file = file;
        file.sanitize();

        let query = r#"
            INSERT INTO files (
                storage_name, original_name, storage_path, size_bytes,
                content_type, uploaded_at, last_modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
        "#;

        let created: FileRecord = query_as::<_, FileRecord>(query)
            .bind(&file.storage_name)
            .bind(&file.original_name)
            .bind(&file.storage_path)
            .bind(file.size_bytes as i64)
            .bind(&file.content_type)
            .bind(file.uploaded_at)
            .bind(file.last_modified_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::Database(e.to_string()))?;

        Ok(created)
    }

    async fn find_all_newest_first(&self) -> Result<Vec<FileRecord>, ApplicationError> {
        let query = "SELECT * FROM files ORDER BY uploaded_at DESC, id DESC";

        query_as::<_, FileRecord>(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::Database(e.to_string()))
    }

    async fn find_by_storage_name(
        &self,
        storage_name: &str,
    ) -> Result<Option<FileRecord>, ApplicationError> {
        let query = "SELECT * FROM files WHERE storage_name = $1";

        query_as::<_, FileRecord>(query)
            .bind(storage_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApplicationError::Database(e.to_string()))
    }

    async fn delete(&self, file: &FileRecord) -> Result<(), ApplicationError> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(file.id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::Database(e.to_string()))?;

        // Someone else deleted it between our lookup and now.
        if result.rows_affected() == 0 {
            return Err(ApplicationError::NotFound(file.storage_name.clone()));
        }

        Ok(())
    }
}
