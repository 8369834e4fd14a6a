use sqlx::{postgres::PgRow, FromRow, Row};

use crate::domain::models::metadata::FileRecord;

impl FromRow<'_, PgRow> for FileRecord {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let size_bytes: i64 = row.try_get("size_bytes")?;

        Ok(FileRecord {
            id: row.try_get("id")?,
            storage_name: row.try_get("storage_name")?,
            original_name: row.try_get("original_name")?,
            size_bytes: size_bytes.max(0) as u64,
            content_type: row.try_get("content_type")?,
            uploaded_at: row.try_get("uploaded_at")?,
            last_modified_at: row.try_get("last_modified_at")?,
            storage_path: row.try_get("storage_path")?,
        })
    }
}
