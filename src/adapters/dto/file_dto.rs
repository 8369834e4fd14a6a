use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::models::metadata::FileRecord;

#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub id: i64,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "originalFileName")]
    pub original_file_name: String,
    #[serde(rename = "fileSize")]
    pub file_size: u64,
    #[serde(rename = "contentType")]
    pub content_type: String,
    #[serde(rename = "uploadedAt")]
    pub uploaded_at: DateTime<Utc>,
    #[serde(rename = "lastModified")]
    pub last_modified: DateTime<Utc>,
}

impl From<FileRecord> for FileResponse {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id,
            file_name: record.storage_name,
            original_file_name: record.original_name,
            file_size: record.size_bytes,
            content_type: record.content_type,
            uploaded_at: record.uploaded_at,
            last_modified: record.last_modified_at,
        }
    }
}
