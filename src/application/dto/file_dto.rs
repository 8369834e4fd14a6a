use chrono::{DateTime, Utc};

use crate::domain::models::metadata::FileRecord;

/// A record that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct NewFileDTO {
    pub storage_name: String,
    pub original_name: String,
    pub size_bytes: u64,
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
    pub storage_path: String,
}

impl NewFileDTO {
    pub fn into_record(self, id: i64) -> FileRecord {
        FileRecord {
            id,
            storage_name: self.storage_name,
            original_name: self.original_name,
            size_bytes: self.size_bytes,
            content_type: self.content_type,
            uploaded_at: self.uploaded_at,
            last_modified_at: self.last_modified_at,
            storage_path: self.storage_path,
        }
    }

    /// Postgres BIGINT can't hold the full u64 range.
    pub fn sanitize(&mut self) {
        self.size_bytes = std::cmp::min(self.size_bytes, i64::MAX as u64);
    }
}
